pub mod checkout;
pub mod customers;
pub mod order_number;
pub mod pricing;
