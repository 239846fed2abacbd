use shift_calculator_backend::error::StartupError;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    shift_calculator_backend::run().await
}
