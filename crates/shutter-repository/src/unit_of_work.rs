use sea_orm::DatabaseTransaction;

use crate::{error::Result, manager::RepositoryScope};

/// A single database transaction. All repositories obtained through it see and
/// write the same uncommitted state.
pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    pub(crate) fn new(txn: DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn commit(self) -> Result<()> {
        self.txn.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> Result<()> {
        self.txn.rollback().await?;
        Ok(())
    }
}

impl RepositoryScope for UnitOfWork {
    type Conn = DatabaseTransaction;

    fn connection(&self) -> &DatabaseTransaction {
        &self.txn
    }
}
