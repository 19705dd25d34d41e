pub mod sales_export;
