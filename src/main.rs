// This is my main entry point for the ledger simulator CLI
// Every invocation starts from a blank in-memory state, so the commands
// here are self-contained sessions rather than operations on stored data
use clap::Parser;
use log::{error, LevelFilter};
use simchain::utils::to_pretty_json;
use simchain::{Command, NetworkRegistry, Opt, TransactionRequest};
use std::process;

fn main() {
    // Info level gives me enough detail without being too verbose
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let opt = Opt::parse();

    // If something goes wrong, I log the error and exit with code 1
    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        // A full tour of one network: seeded wallets, a fresh wallet,
        // fee advice, a transfer, manual mining, and clean shutdown
        Command::Demo { network } => run_demo(&network)?,
        // One advisor call against the network's live mempool
        Command::EstimateFee { details, network } => {
            let registry = NetworkRegistry::default();
            let estimate = registry.estimate_fee(&network, &details)?;
            println!("Suggested fee: {}", estimate.suggested_fee);
            println!("Reasoning: {}", estimate.reasoning);
            registry.shutdown();
        }
    }
    Ok(())
}

fn run_demo(network_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let registry = NetworkRegistry::default();

    println!("=== Wallets seeded on '{network_id}' ===");
    let seeded = registry.list_wallets(network_id)?;
    println!("{}", to_pretty_json(&seeded)?);

    // The first seeded wallet funds the demo transfer
    let sender = match seeded.first() {
        Some(view) => view.public_key.clone(),
        None => return Err(format!("no seeded wallets on network {network_id}").into()),
    };

    let fresh = registry.create_wallet(network_id, None)?;
    println!("=== New wallet (private key is shown only at creation) ===");
    println!("{}", to_pretty_json(&fresh)?);

    let estimate = registry.estimate_fee(network_id, "sending 25 coins to a friend")?;
    println!("=== Fee advice ===");
    println!("{} ({})", estimate.suggested_fee, estimate.reasoning);

    let request = TransactionRequest {
        from_address: sender.clone(),
        to_address: fresh.public_key.clone(),
        amount: 25.0,
        fee: estimate.suggested_fee,
        signature: format!("signed-by-{sender}"),
        smart_contract_details: None,
    };
    let transaction = registry.submit_transaction(network_id, request)?;
    println!("=== Transaction {} waiting in mempool ===", transaction.get_id());

    let block = registry.mine(network_id, &fresh.public_key)?;
    println!(
        "=== Block {} mined at height {} ===",
        block.get_hash(),
        block.get_height()
    );

    println!("=== Balances after settlement ===");
    for view in registry.list_wallets(network_id)? {
        println!("{}: {}", view.public_key, view.balance);
    }

    println!("=== Full chain ===");
    println!("{}", to_pretty_json(&registry.chain(network_id)?)?);

    registry.shutdown();
    println!("Schedulers stopped. Nothing was persisted.");
    Ok(())
}
