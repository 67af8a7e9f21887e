fn main() {
    tracing_subscriber::fmt::init();
    dadapp_lib::run()
}
