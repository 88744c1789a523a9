pub mod month_year;
pub mod new_subscription;
pub mod subscription;
pub mod subscription_patch;
pub mod total_filter;
