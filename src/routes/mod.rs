mod health_check;
mod subscriptions;
mod subscriptions_list;
mod subscriptions_total;

pub use health_check::health_check;
pub use subscriptions::{
    handle_create_subscription, handle_delete_subscription, handle_get_subscription,
    handle_update_subscription, SubscriptionError,
};
pub use subscriptions_list::handle_list_subscriptions;
pub use subscriptions_total::handle_calculate_total;

fn error_chain_fmt(
    err: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}", err)?;

    let mut current = err.source();

    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }

    Ok(())
}
