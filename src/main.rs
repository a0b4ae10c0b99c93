use std::process::ExitCode;

use dotenvy::dotenv;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    rust_shutter_node::run().await
}
