pub mod p901_product_channel;
pub mod p902_monthly_trend;
pub mod p903_staff_performance;
pub mod p904_product_size;
pub mod p905_product_size_detail;
pub mod summary;
