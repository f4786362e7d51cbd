fn main() {
    jellyserv::app::cli::run();
}
