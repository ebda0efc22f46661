use dotenv::dotenv;
use std::env;

fn main() {
    dotenv().ok();
    let base_dir = env::var("WALLET_VAULT_DIR")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| wallet_vault_core::default_vault_dir());
    let passphrase_set = env::var("WALLET_VAULT_PASSPHRASE").is_ok();

    println!("Wallet Vault Configuration:\n");
    println!("  Storage directory: {}", base_dir.display());
    println!(
        "  Passphrase: {}",
        if passphrase_set { "(set)" } else { "(not set)" }
    );
}
