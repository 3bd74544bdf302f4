// Dump the kernel connection tables and optionally look up one 4-tuple
//
// cargo run --example dump_table
// cargo run --example dump_table -- tcp 127.0.0.1 50000 127.0.0.1 8080

use std::env;
use std::net::IpAddr;

use anyhow::{bail, Context, Result};
use procnet::{Protocol, TableReader};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let reader = TableReader::default();
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        for protocol in Protocol::ALL {
            match reader.read_table(protocol) {
                Ok(conns) => {
                    println!("{}: {} entries", protocol, conns.len());
                    for (i, conn) in conns.iter().take(10).enumerate() {
                        println!("  {}: {}", i + 1, conn.format_display());
                    }
                }
                Err(e) => println!("{}: {}", protocol, e),
            }
        }
        return Ok(());
    }

    if args.len() != 5 {
        bail!("usage: dump_table [PROTO SRC_IP SRC_PORT DST_IP DST_PORT]");
    }

    let protocol: Protocol = args[0].parse()?;
    let src_ip: IpAddr = args[1].parse().context("invalid source address")?;
    let src_port: u16 = args[2].parse().context("invalid source port")?;
    let dst_ip: IpAddr = args[3].parse().context("invalid destination address")?;
    let dst_port: u16 = args[4].parse().context("invalid destination port")?;

    match reader.find_entry(protocol, src_ip, src_port, dst_ip, dst_port) {
        Some(conn) => println!("{}", conn.format_display()),
        None => println!("no matching {} entry", protocol),
    }
    Ok(())
}
