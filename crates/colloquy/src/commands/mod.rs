use async_trait::async_trait;
use eyre::Result;

pub mod apply;
pub mod edit;
pub mod reply;
pub mod show;

#[async_trait]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}
