#[tokio::main]
async fn main() -> std::process::ExitCode {
    autoconf_lib::run().await
}
