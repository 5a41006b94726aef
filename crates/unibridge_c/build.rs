use csbindgen::Builder;

fn main() {
    common_builder()
        .input_extern_file("src/lib.rs")
        .input_extern_file("src/api/bridges.rs")
        .input_extern_file("src/api/popup.rs")
        .input_extern_file("src/api/network.rs")
        .input_extern_file("src/api/sharing.rs")
        .input_extern_file("src/ffi.rs")
        .generate_csharp_file("../../managed/Unibridge/Runtime/Generated/NativeMethods.g.cs")
        .unwrap();
}

fn common_builder() -> Builder {
    Builder::default()
        .csharp_dll_name("libunibridge_c")
        .csharp_dll_name_if("UNITY_IOS && !UNITY_EDITOR", "__Internal")
        .csharp_namespace("Unibridge.Native")
        .csharp_use_nint_types(true)
        .csharp_use_function_pointer(false)
}
