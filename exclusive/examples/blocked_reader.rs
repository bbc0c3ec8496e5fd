use anyhow::Result;
use exclusive::Builder;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cell = Builder::new().name("config").build(String::from("v1"));

    let mut writer = cell.borrow_mut();

    thread::scope(|s| {
        let reader = s.spawn(|| cell.borrow().clone());

        thread::sleep(Duration::from_millis(100));
        writer.push_str("-patched");
        drop(writer);

        let seen = reader.join().expect("reader panicked");
        println!("reader saw: {}", seen);
    });

    println!("{:?}", cell);
    Ok(())
}
