use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match tomato_leaf_lib::run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
