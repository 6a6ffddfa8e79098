fn main() {
    oncall_sync::app::cli::run();
}
