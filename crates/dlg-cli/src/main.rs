fn main() {
    std::process::exit(dlg_cli::run_cli_from_args(std::env::args_os()));
}
