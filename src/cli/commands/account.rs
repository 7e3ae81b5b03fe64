//! Account command handlers

use crate::db::Account;
use crate::state::SharedState;

fn print_account(account: &Account) {
    let status = if account.active { "active" } else { "disabled" };
    println!("• {} [{}]", account.username, status);
    println!("  ID: {} | Created: {}", account.id, account.created_at);
}

pub async fn cmd_account_create(
    state: &SharedState,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    let account = state.accounts.register(username, password).await?;

    println!("✓ Created account: {}", account.username);
    println!("  ID: {}", account.id);
    Ok(())
}

pub async fn cmd_account_list(state: &SharedState) -> anyhow::Result<()> {
    let accounts = state.accounts.list().await?;

    if accounts.is_empty() {
        println!("No accounts registered.");
        println!();
        println!("Create one with: rapport account create <username> <password>");
        return Ok(());
    }

    println!("Accounts ({} total)", accounts.len());
    println!("{:-<70}", "");

    for account in &accounts {
        print_account(account);
    }

    Ok(())
}

pub async fn cmd_account_show(state: &SharedState, username: &str) -> anyhow::Result<()> {
    let account = state.accounts.get_by_username(username).await?;
    print_account(&account);

    let friends = state.friendships.list_friends(&account.id).await?;
    let incoming = state.friendships.incoming_requests(&account.id).await?;
    println!(
        "  Friends: {} | Pending requests: {}",
        friends.len(),
        incoming.len()
    );
    Ok(())
}

pub async fn cmd_account_disable(state: &SharedState, username: &str) -> anyhow::Result<()> {
    state.accounts.disable(username).await?;
    println!("✓ Disabled: {}", username);
    Ok(())
}

pub async fn cmd_account_delete(state: &SharedState, username: &str) -> anyhow::Result<()> {
    state.accounts.delete(username).await?;
    println!("✓ Deleted: {}", username);
    Ok(())
}

pub async fn cmd_account_verify(
    state: &SharedState,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    if state.accounts.verify_password(username, password).await? {
        println!("✓ Password matches for {}", username);
    } else {
        println!("✗ Password does not match (or account is disabled)");
    }
    Ok(())
}
