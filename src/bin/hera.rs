fn main() {
    hera::cli::run();
}
