// build.rs

fn main() {
    // --- Link against X11 and EGL ---
    // pkg-config is the standard way to find library linking information on
    // Unix-like systems. If it fails (not installed, or a .pc file is missing),
    // fall back to manually specifying common linker flags.

    let libraries = ["x11", "egl"];

    let mut pkg_config_success = true;

    for lib in &libraries {
        let result = pkg_config::probe_library(lib);

        if result.is_err() {
            // probe_library already printed the underlying error.
            eprintln!(
                "pkg-config failed for library '{}'. Falling back to manual linking.",
                lib
            );
            pkg_config_success = false;
            break;
        }
    }

    if !pkg_config_success {
        // --- Manual Linking Fallback ---
        // Assumes the libraries live in standard paths like /usr/lib or
        // /usr/local/lib. Adjust the -L path below (or set LIBRARY_PATH) if
        // they are installed somewhere unusual.
        println!("cargo:rustc-link-lib=X11");
        println!("cargo:rustc-link-lib=EGL");
        println!("cargo:rustc-link-search=/usr/lib");

        eprintln!(
            "Manual linking flags applied. Ensure the X11 and EGL development libraries are installed."
        );
    } else {
        eprintln!("pkg-config successfully found libraries. Linking configured automatically.");
    }
}
