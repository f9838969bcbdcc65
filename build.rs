fn main() {
    println!("cargo:rerun-if-changed=resources/index.html");

    // Propagate the ESP-IDF toolchain environment only for device builds;
    // host builds (tests, fuzzing) never touch embuild.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
