//! Asynchronous hand-off of committed withdrawals to the payment rail.
//!
//! The ledger debit has already committed by the time `dispatch` runs;
//! nothing here touches the balance again. Retries apply to the forward
//! only, and the account row is never locked while waiting on the rail.

use std::time::Duration;

use serde_json::json;

use crate::db::queries::withdrawals;
use crate::AppState;

const MAX_ATTEMPTS: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_BACKOFF: Duration = Duration::from_secs(5);

/// Forward a pending withdrawal to the configured payment rail in the
/// background. Without a configured rail the row simply stays pending for
/// out-of-band processing.
pub fn dispatch(state: &AppState, withdrawal: entity::withdrawal::Model) {
    let Some(url) = state.config.payout_url.clone() else {
        tracing::warn!(
            withdrawal_id = %withdrawal.id,
            "no payout rail configured; withdrawal stays pending"
        );
        return;
    };

    let db = state.db.clone();
    tokio::spawn(async move {
        let client = reqwest::Client::new();
        let body = json!({
            "withdrawal_id": withdrawal.id,
            "amount_cents": withdrawal.amount_cents,
            "destination": withdrawal.destination,
        });

        for attempt in 1..=MAX_ATTEMPTS {
            let result = client
                .post(&url)
                .timeout(REQUEST_TIMEOUT)
                .json(&body)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    tracing::info!(withdrawal_id = %withdrawal.id, "payout accepted by rail");
                    if let Err(e) =
                        withdrawals::mark_status(&db, &withdrawal.id, withdrawals::STATUS_COMPLETED)
                            .await
                    {
                        tracing::error!(withdrawal_id = %withdrawal.id, "failed to mark payout completed: {e}");
                    }
                    return;
                }
                // A 4xx from the rail is a permanent refusal; only
                // transport failures and 5xx are worth retrying.
                Ok(response) if response.status().is_client_error() => {
                    tracing::warn!(
                        withdrawal_id = %withdrawal.id,
                        status = %response.status(),
                        "payout rail refused withdrawal"
                    );
                    if let Err(e) =
                        withdrawals::mark_status(&db, &withdrawal.id, withdrawals::STATUS_FAILED)
                            .await
                    {
                        tracing::error!(withdrawal_id = %withdrawal.id, "failed to mark payout failed: {e}");
                    }
                    return;
                }
                Ok(response) => {
                    tracing::warn!(
                        withdrawal_id = %withdrawal.id,
                        status = %response.status(),
                        attempt,
                        "payout rail rejected forward"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        withdrawal_id = %withdrawal.id,
                        attempt,
                        "payout forward failed: {e}"
                    );
                }
            }

            if attempt < MAX_ATTEMPTS {
                tokio::time::sleep(RETRY_BACKOFF).await;
            }
        }

        tracing::error!(withdrawal_id = %withdrawal.id, "payout forward exhausted retries");
        if let Err(e) =
            withdrawals::mark_status(&db, &withdrawal.id, withdrawals::STATUS_FAILED).await
        {
            tracing::error!(withdrawal_id = %withdrawal.id, "failed to mark payout failed: {e}");
        }
    });
}
