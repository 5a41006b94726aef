use std::ffi::c_void;
use std::ffi::{CString, c_int};
use std::io::{BufRead, BufReader, PipeReader};
use std::os::unix::io::FromRawFd;
use std::thread;
use thiserror::Error;

use ndk_sys::__android_log_write;

const ANDROID_LOG_INFO: c_int = 4;
const LOG_TAG: &str = "unibridge";

#[derive(Error, Debug)]
pub enum AndroidApiError {
    #[error("Failed to create pipe")]
    PipeCreationFailed,
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn JNI_OnLoad(vm: *mut c_void, reserved: *mut c_void) -> c_int {
    unsafe {
        set_stdout_redirect(LOG_TAG).unwrap_or_else(|e| {
            log_to_logcat(LOG_TAG, &format!("Failed to redirect stdout: {}", e));
        });
        unibridge::android::set_java_vm(vm as *mut _, reserved)
    }
}

pub fn log_to_logcat(tag: &str, message: &str) {
    let tag = CString::new(tag).unwrap_or_default();
    let message = CString::new(message).unwrap_or_default();
    unsafe {
        __android_log_write(ANDROID_LOG_INFO, tag.as_ptr(), message.as_ptr());
    }
}

// redirect stdout to logcat
pub unsafe fn set_stdout_redirect(log_tag: &'static str) -> Result<(), AndroidApiError> {
    let mut pipe_fds = [0; 2];
    unsafe {
        if libc::pipe(pipe_fds.as_mut_ptr()) == -1 {
            return Err(AndroidApiError::PipeCreationFailed);
        }
        libc::dup2(pipe_fds[1], libc::STDOUT_FILENO);
        libc::dup2(pipe_fds[1], libc::STDERR_FILENO);
    }

    thread::spawn(move || {
        let pipe_read_end = unsafe { PipeReader::from_raw_fd(pipe_fds[0]) };
        let reader = BufReader::new(pipe_read_end);

        for line in reader.lines().map_while(|r| r.ok()) {
            log_to_logcat(log_tag, &line);
        }
    });

    unsafe {
        libc::close(pipe_fds[1]);
    }

    Ok(())
}
