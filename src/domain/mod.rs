pub mod client_order_id;
pub mod order_params;
