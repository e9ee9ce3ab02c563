fn main() {
    fpmkit::app::cli::run();
}
