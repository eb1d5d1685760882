pub mod test_data;

mod test_miner;

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}
