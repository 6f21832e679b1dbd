//! Builds a THORChain deposit and a bank send, encodes both to wire
//! bytes, decodes them back, and prints the JSON object form.
//!
//! Run with `RUST_LOG=debug cargo run -p tx-builder` to watch the
//! schema registry come up.

use runewire::{Asset, Coin, MsgDeposit, MsgSend, ObjectOptions, WireMessage};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn rune() -> Asset {
    Asset {
        chain: "THOR".into(),
        symbol: "RUNE".into(),
        ticker: "RUNE".into(),
        ..Asset::default()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // -------------------------------------------------------------------
    // MsgDeposit: 1 RUNE into the swap memo
    // -------------------------------------------------------------------

    let deposit = MsgDeposit {
        coins: vec![Coin {
            asset: Some(rune()),
            amount: "100000000".into(),
            decimals: 8,
        }],
        memo: "SWAP:BTC.BTC:bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh".into(),
        signer: vec![0x01, 0x02, 0x03, 0x04, 0x05],
    };

    if let Some(problem) = MsgDeposit::verify_value(&deposit.to_value()) {
        return Err(problem.into());
    }

    let bytes = deposit.encode()?;
    info!(len = bytes.len(), "encoded MsgDeposit");
    println!("MsgDeposit wire bytes: {}", hex(&bytes));

    let decoded = MsgDeposit::decode(&bytes)?;
    assert_eq!(decoded, deposit);

    let object = decoded.to_object(&ObjectOptions::default())?;
    println!("MsgDeposit as JSON:\n{}", serde_json::to_string_pretty(&object)?);

    // -------------------------------------------------------------------
    // MsgSend: plain bank transfer between two accounts
    // -------------------------------------------------------------------

    let send = MsgSend {
        from_address: vec![0xAA; 20],
        to_address: vec![0xBB; 20],
        amount: vec![runewire::cosmos::Coin {
            denom: "rune".into(),
            amount: "42000000".into(),
        }],
    };

    let bytes = send.encode()?;
    info!(len = bytes.len(), "encoded MsgSend");
    println!("MsgSend wire bytes: {}", hex(&bytes));

    let round_tripped = MsgSend::from_object(
        &MsgSend::decode(&bytes)?.to_object(&ObjectOptions::with_defaults())?,
    )?;
    assert_eq!(round_tripped, send);

    let object = send.to_object(&ObjectOptions::default())?;
    println!("MsgSend as JSON:\n{}", serde_json::to_string_pretty(&object)?);

    Ok(())
}
