mod bridges;
mod network;
mod popup;
mod sharing;

#[cfg(target_os = "android")]
mod android;
