pub mod callbacks;
pub mod napi_exports;
