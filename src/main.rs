use users_api::{
    startup,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() {
    let subscriber = get_subscriber("users-api".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);
    startup::run().await
}
