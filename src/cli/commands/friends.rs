//! Friendship command handlers

use crate::state::SharedState;

pub async fn cmd_friends_list(state: &SharedState, user_id: &str) -> anyhow::Result<()> {
    let friends = state.friendships.list_friends(user_id).await?;

    if friends.is_empty() {
        println!("No friends yet.");
        return Ok(());
    }

    println!("Friends ({} total)", friends.len());
    println!("{:-<70}", "");
    for friend in friends {
        println!("• {} (ID: {})", friend.username, friend.id);
    }

    Ok(())
}

pub async fn cmd_friends_incoming(state: &SharedState, user_id: &str) -> anyhow::Result<()> {
    let requests = state.friendships.incoming_requests(user_id).await?;

    if requests.is_empty() {
        println!("No pending friend requests.");
        return Ok(());
    }

    println!("Pending requests ({} total)", requests.len());
    println!("{:-<70}", "");
    for request in requests {
        println!(
            "• from {} (ID: {})",
            request.requester.username, request.requester.id
        );
        println!(
            "  Request: {} | Sent: {}",
            request.friendship.id, request.friendship.created_at
        );
    }

    Ok(())
}
