pub mod api;

use anyhow::Result;

pub async fn start(port: u16, bind: &str) -> Result<()> {
    api::serve(port, bind).await
}
