#[tokio::main]
async fn main() {
    event_backend::run().await;
}
