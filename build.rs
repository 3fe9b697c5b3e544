fn main() {
    // Host builds have nothing to generate; only device builds need the
    // ESP-IDF environment exported to the linker.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
