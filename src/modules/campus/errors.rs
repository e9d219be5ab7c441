use crate::modules::campus::adapters::outbound::store::StoreError;
use crate::shared::infrastructure::session::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("view has been torn down")]
    TornDown,
}
