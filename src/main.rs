#[tokio::main]
async fn main() {
    if let Err(e) = riskdesk::run().await {
        eprintln!("riskdesk: {e}");
        std::process::exit(1);
    }
}
