fn main() {
    // Locate the system libxdo (headers + shared library) via pkg-config.
    // The whole crate is a binding to it, so a missing library is fatal.
    if let Err(e) = pkg_config::probe_library("libxdo") {
        eprintln!("Failed to find libxdo using pkg-config: {}", e);
        eprintln!("Please ensure libxdo is installed and configured correctly.");
        eprintln!("On Debian/Ubuntu, you can install it with: sudo apt-get install libxdo-dev");
        eprintln!("On Arch, it ships with: sudo pacman -S --needed xdotool");
        std::process::exit(1);
    }

    println!("cargo:rustc-link-lib=xdo");
    println!("cargo:rerun-if-changed=build.rs");
}
