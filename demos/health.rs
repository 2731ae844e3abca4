use qwen_image::QwenClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let client = QwenClient::new(None)?;

    println!("Checking service health at {}...", client.base_url());

    match client.check_health().await {
        Ok(health) => {
            println!("Service is healthy");
            if let Some(gpu_info) = health.gpu_info {
                if let Some(count) = gpu_info.gpu_count {
                    println!("GPUs: {}", count);
                }
                for (i, mem) in gpu_info.gpu_memory.iter().enumerate() {
                    println!("GPU {}: {}", i, mem);
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}
