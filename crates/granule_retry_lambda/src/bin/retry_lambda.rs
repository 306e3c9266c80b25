use granule_retry_lambda::config::HandlerConfig;
use granule_retry_lambda::handlers::retry::{handle_retry_event, ReplaceResponse};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<ReplaceResponse, Error> {
    let config = HandlerConfig::from_env();
    handle_retry_event(event.payload, &config).map_err(|error| Error::from(error.message))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
