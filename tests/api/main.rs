mod helpers;
mod subscriptions_total;
