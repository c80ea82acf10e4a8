mod cleanup;
mod deep_crud;
#[cfg(not(feature = "disable-mocks"))]
mod mocks;
mod wide_crud;

pub use cleanup::cleanup_idempotence;
pub use deep_crud::DeepCrud;
#[cfg(not(feature = "disable-mocks"))]
pub use mocks::mock_round_trip;
pub use wide_crud::WideCrud;

use log::LevelFilter;
use std::env;
use trove::Driver;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub async fn execute_tests<D: Driver + Clone>(driver: D) {
    WideCrud::new(driver.clone())
        .test_crud()
        .await
        .expect("Wide CRUD test did not succeed");
    DeepCrud::new(driver.clone())
        .test_crud()
        .await
        .expect("Deep CRUD test did not succeed");
    #[cfg(not(feature = "disable-mocks"))]
    mock_round_trip(&driver)
        .await
        .expect("Mock round trip test did not succeed");
    cleanup_idempotence(&driver)
        .await
        .expect("Cleanup test did not succeed");
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
