//! A client-side cache of transactions, kept in sync with the server through the REST client.

use crate::{
    Error, TransactionId, TransactionPayload,
    endpoints::{self, format_endpoint},
    rest_client::TransactionRestClient,
    transaction::Transaction,
};

/// The transactions known to a client and whether they are being fetched.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    client: TransactionRestClient,
    transactions: Vec<Transaction>,
    is_loading: bool,
}

impl TransactionStore {
    /// Create an empty store that talks to the API through `client`.
    pub fn new(client: TransactionRestClient) -> Self {
        Self {
            client,
            transactions: Vec::new(),
            is_loading: false,
        }
    }

    /// The transactions from the last successful refresh, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Whether a refresh is in progress.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Replace the cached transactions with the ones on the server.
    ///
    /// # Errors
    /// Returns [Error::RequestFailed] if the transactions could not be fetched. The cached
    /// transactions are left as they were.
    pub async fn get_all_transactions(&mut self) -> Result<&[Transaction], Error> {
        self.is_loading = true;
        let transactions = self.client.list_all().await;
        self.is_loading = false;

        match transactions {
            Some(transactions) => {
                tracing::debug!("fetched {} transactions", transactions.len());
                self.transactions = transactions;
                Ok(&self.transactions)
            }
            None => Err(self.request_failed(endpoints::TRANSACTIONS_API)),
        }
    }

    /// Register a transaction on the server and refresh the cache.
    ///
    /// # Errors
    /// Returns [Error::RequestFailed] if the transaction could not be registered or the cache
    /// could not be refreshed afterwards.
    pub async fn save_transaction(
        &mut self,
        new_transaction: &TransactionPayload,
    ) -> Result<Transaction, Error> {
        let transaction = self
            .client
            .create(new_transaction)
            .await
            .ok_or_else(|| self.request_failed(endpoints::TRANSACTIONS_API))?;

        self.get_all_transactions().await?;

        Ok(transaction)
    }

    /// Replace a transaction on the server and refresh the cache.
    ///
    /// # Errors
    /// Returns [Error::RequestFailed] if the transaction could not be updated or the cache
    /// could not be refreshed afterwards.
    pub async fn update_transaction(
        &mut self,
        id: TransactionId,
        changes: &TransactionPayload,
    ) -> Result<Transaction, Error> {
        let transaction = self
            .client
            .replace(id, changes)
            .await
            .ok_or_else(|| self.request_failed(&format_endpoint(endpoints::TRANSACTION_API, id)))?;

        self.get_all_transactions().await?;

        Ok(transaction)
    }

    /// Delete a transaction on the server and refresh the cache.
    ///
    /// # Errors
    /// Returns [Error::RequestFailed] if the transaction could not be deleted or the cache
    /// could not be refreshed afterwards.
    pub async fn delete_transaction(&mut self, id: TransactionId) -> Result<(), Error> {
        if !self.client.delete(id).await {
            return Err(self.request_failed(&format_endpoint(endpoints::TRANSACTION_API, id)));
        }

        self.get_all_transactions().await?;

        Ok(())
    }

    fn request_failed(&self, endpoint: &str) -> Error {
        Error::RequestFailed(self.client.url_for(endpoint))
    }
}
