//! Demo: one customer orders two tortas and a drink, then follows the
//! submission until the cart is cleared.

use calzadita_order::lifecycle::{setup_tracing, OrderingConfig, OrderingSystem};
use calzadita_order::model::{ItemId, SequencerState};
use calzadita_order::order_actor::SubmitOutcome;
use std::time::Duration;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = OrderingConfig::load();
    info!(store_dir = %config.store_dir.display(), "Starting ordering system");
    let system = OrderingSystem::with_file_store(config);

    let session = system.open_session().await.map_err(|e| e.to_string())?;

    let span = tracing::info_span!("cart");
    async {
        let torta = session
            .add_item(ItemId(1))
            .await?
            .ok_or("Torta de Jamón missing from the menu")?;
        session.add_item(ItemId(1)).await?;
        session.add_item(ItemId(10)).await?;
        session.set_unit_note(torta, 1, "sin cebolla").await?;

        let (total, items) = session.totals().await?;
        info!(%total, items, "Cart ready");
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    if session
        .selected_phone()
        .await
        .map_err(|e| e.to_string())?
        .is_none()
    {
        let id = session
            .add_phone(Some("Casa".to_string()), "555 123 4567")
            .await
            .map_err(|e| e.to_string())?;
        info!(%id, "Saved contact");
    }

    let span = tracing::info_span!("submission");
    async {
        match session.submit().await.map_err(|e| e.to_string())? {
            SubmitOutcome::Started { summary, .. } => {
                println!("{}", summary.to_message());
                if let Some(link) = session.whatsapp_link(&summary) {
                    info!(%link, "Handoff link");
                }
            }
            refused => {
                warn!(?refused, "Submission not started");
                return Ok(());
            }
        }

        loop {
            tokio::time::sleep(Duration::from_millis(500)).await;
            let status = session.status().await.map_err(|e| e.to_string())?;
            if status.state == SequencerState::Idle {
                break;
            }
            info!(stage = status.stage.as_deref().unwrap_or(""), "Waiting");
        }

        let (_, items) = session.totals().await.map_err(|e| e.to_string())?;
        info!(items, "Order delivered to the vendor, cart cleared");
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    session.close().await.map_err(|e| e.to_string())?;
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
