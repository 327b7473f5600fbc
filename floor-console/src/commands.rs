//! One handler per subcommand, each driving the matching view-model

use anyhow::{Context, Result, anyhow, bail};
use floor_client::models::CustomerUpdate;
use floor_client::views::{
    CustomerFormMode, HomePage, TableDetailModal, TablesPage, ZoneDetailPage, filter_customers,
};
use floor_client::{FloorStore, LoadState};

use crate::cli::{Command, Confirm, CustomerCommand, SeatTarget, TableCommand, ZoneCommand};
use crate::render;

pub async fn run(store: &FloorStore, command: Command) -> Result<String> {
    match command {
        Command::Zones(cmd) => zones(store, cmd).await,
        Command::Tables(cmd) => tables(store, cmd).await,
        Command::Customers(cmd) => customers(store, cmd).await,
    }
}

fn confirmed(confirm: &Confirm, what: &str) -> Result<()> {
    if !confirm.yes {
        bail!("Deleting {what} cannot be undone; pass --yes to confirm");
    }
    Ok(())
}

// ========== Zones ==========

async fn zones(store: &FloorStore, cmd: ZoneCommand) -> Result<String> {
    match cmd {
        ZoneCommand::List => {
            let mut page = HomePage::new(store.clone());
            page.load().await?;
            Ok(render::zone_cards(page.cards()))
        }
        ZoneCommand::Show { id } => {
            let mut page = ZoneDetailPage::from_route(store.clone(), &id)?;
            page.load().await?;
            match page.status() {
                LoadState::Ready(detail) => Ok(render::zone_detail(&detail)),
                LoadState::Failed(message) => Err(anyhow!(message)),
                _ => bail!("Zone {} did not finish loading", page.zone_id()),
            }
        }
        ZoneCommand::Create { name } => {
            let mut page = HomePage::new(store.clone());
            page.open_create();
            page.set_new_zone_name(name);
            let zone = page.submit_create().await?;
            Ok(format!("Created zone {} (#{})\n", zone.name, zone.id))
        }
        ZoneCommand::Rename { id, name } => {
            let mut page = HomePage::new(store.clone());
            page.load().await?;
            let card = page
                .card_mut(id)
                .with_context(|| format!("Zone {id} not found"))?;
            card.start_edit();
            card.set_draft(name);
            page.save_zone(id).await?;
            Ok(format!("Renamed zone #{id}\n"))
        }
        ZoneCommand::Delete { id, confirm } => {
            confirmed(&confirm, &format!("zone #{id}"))?;
            let mut page = HomePage::new(store.clone());
            page.load().await?;
            page.card_mut(id)
                .with_context(|| format!("Zone {id} not found"))?
                .request_delete();
            page.confirm_delete_zone(id).await?;
            Ok(format!("Deleted zone #{id}\n"))
        }
        ZoneCommand::Stats => {
            let stats = store.zone_statistics().await?;
            Ok(render::statistics(&stats))
        }
    }
}

// ========== Tables ==========

async fn tables(store: &FloorStore, cmd: TableCommand) -> Result<String> {
    match cmd {
        TableCommand::List { available: true } => {
            let tables = store.available_tables().await?;
            Ok(render::tables(&tables))
        }
        TableCommand::List { available: false } => {
            let mut page = TablesPage::new(store.clone());
            page.load().await?;
            Ok(render::table_cards(page.cards()))
        }
        TableCommand::Show { id } => {
            let table = store.fetch_table(id).await?;
            Ok(render::table_details(&TableDetailModal::new(table)))
        }
        TableCommand::Add {
            zone,
            name,
            capacity,
        } => {
            let mut page = ZoneDetailPage::new(store.clone(), zone);
            page.load().await?;
            page.open_add_table();
            if let Some(modal) = page.add_modal_mut() {
                modal.draft.name = name;
                modal.draft.capacity = capacity;
            }
            let table = page.submit_add_table().await?;
            Ok(format!("Added table {} (#{}) to zone #{zone}\n", table.name, table.id))
        }
        TableCommand::Edit { id, name, capacity } => {
            if name.is_none() && capacity.is_none() {
                bail!("Nothing to change; pass --name and/or --capacity");
            }
            let mut page = TablesPage::new(store.clone());
            page.load().await?;
            let card = page
                .card_mut(id)
                .with_context(|| format!("Table {id} not found"))?;
            card.start_edit();
            if let Some(name) = name {
                card.set_name(name);
            }
            if let Some(capacity) = capacity {
                card.set_capacity(capacity);
            }
            page.save_table(id).await?;
            Ok(format!("Updated table #{id}\n"))
        }
        TableCommand::Delete { id, confirm } => {
            confirmed(&confirm, &format!("table #{id}"))?;
            let mut page = TablesPage::new(store.clone());
            page.load().await?;
            page.card_mut(id)
                .with_context(|| format!("Table {id} not found"))?
                .request_delete();
            page.confirm_delete_table(id).await?;
            Ok(format!("Deleted table #{id}\n"))
        }
    }
}

// ========== Customers ==========

async fn customers(store: &FloorStore, cmd: CustomerCommand) -> Result<String> {
    match cmd {
        CustomerCommand::List { search } => {
            store.load_customers().await?;
            let all = store.customers();
            let matching = all
                .ready()
                .map(|customers| filter_customers(customers, &search))
                .unwrap_or_default();
            Ok(render::customers(&matching))
        }
        CustomerCommand::Seat { table, who } => seat(store, table, who).await,
        CustomerCommand::Leave { table } => {
            let mut page = TablesPage::new(store.clone());
            page.load().await?;
            page.return_table(table).await?;
            Ok(format!("Table #{table} is free again\n"))
        }
        CustomerCommand::Edit { id, name, phone } => {
            if name.is_none() && phone.is_none() {
                bail!("Nothing to change; pass --name and/or --phone");
            }
            let customer = store
                .update_customer(
                    id,
                    &CustomerUpdate {
                        name,
                        phone,
                        table_id: None,
                    },
                )
                .await?;
            Ok(format!("Updated customer {} (#{})\n", customer.name, customer.id))
        }
        CustomerCommand::Delete { id, confirm } => {
            confirmed(&confirm, &format!("customer #{id}"))?;
            store.delete_customer(id).await?;
            Ok(format!("Deleted customer #{id}\n"))
        }
    }
}

async fn seat(store: &FloorStore, table: i64, who: SeatTarget) -> Result<String> {
    let mut page = TablesPage::new(store.clone());
    page.load().await?;
    page.open_seat_form(table).await?;

    let form = page
        .card_mut(table)
        .and_then(|card| card.seat_form_mut())
        .with_context(|| format!("Table {table} not found"))?;
    match who.customer {
        Some(customer_id) => {
            form.set_mode(CustomerFormMode::Existing);
            if !form.select(customer_id) {
                bail!("Customer {customer_id} is not waiting for a table");
            }
        }
        None => {
            form.set_mode(CustomerFormMode::New);
            form.set_name(who.name.unwrap_or_default());
            form.set_phone(who.phone.unwrap_or_default());
        }
    }

    page.submit_seat_form(table).await?;
    Ok(format!("Customer seated at table #{table}\n"))
}
