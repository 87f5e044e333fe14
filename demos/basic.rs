/* demos/basic.rs */

use std::time::Duration;

use livestore::memory::MemoryBackend;
use livestore::{CancellationToken, EventHandlerFuncs, Storage, Upstream, VirtualHost};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// 1. Setup storage with a short poll interval
	let storage = Storage::builder(MemoryBackend::new())
		.poll_interval(Duration::from_millis(200))
		.build();
	storage.register().await?;

	let upstreams = storage.upstreams();
	upstreams.create(Upstream::new("users", "static")).await?;

	// 2. Watch upstreams; "users" is part of the baseline and is not reported
	let handler = EventHandlerFuncs::new()
		.with_add(|list: &[Upstream], obj: &Upstream| {
			println!("added {} ({} upstreams)", obj.name, list.len());
		})
		.with_update(|_: &[Upstream], obj: &Upstream| {
			println!("updated {} -> {}", obj.name, obj.upstream_type);
		})
		.with_delete(|list: &[Upstream], obj: &Upstream| {
			println!("deleted {} ({} upstreams left)", obj.name, list.len());
		});

	let stop = CancellationToken::new();
	let handle = upstreams.watch([handler]).spawn(stop.clone());

	// 3. Mutate and let the session pick the changes up
	tokio::time::sleep(Duration::from_millis(300)).await;
	upstreams.create(Upstream::new("orders", "static")).await?;
	tokio::time::sleep(Duration::from_millis(300)).await;
	upstreams.update(Upstream::new("users", "aws")).await?;
	tokio::time::sleep(Duration::from_millis(300)).await;
	upstreams.delete("orders").await?;
	tokio::time::sleep(Duration::from_millis(300)).await;

	storage
		.virtual_hosts()
		.create(VirtualHost::new("default").with_domains(["*"]))
		.await?;
	println!("virtual hosts: {:?}", storage.virtual_hosts().list().await?);

	// 4. Stop
	stop.cancel();
	handle.join().await?;
	println!("Done.");
	Ok(())
}
