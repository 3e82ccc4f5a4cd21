#[tokio::main]
async fn main() {
    if let Err(e) = matchmaking_backend::run().await {
        eprintln!("matchmaking-backend failed: {}", e);
        std::process::exit(1);
    }
}
