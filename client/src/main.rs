//! Thin terminal client: prompt for a username, forward stdin lines to the
//! server, print every inbound line. Typing `exit` closes the connection.

use std::io::Write as _;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

/// lanchat terminal client
#[derive(Parser, Debug)]
#[command(name = "lanchat-client", version, about = "Terminal client for a lanchat server")]
struct Args {
    /// Server host to connect to
    #[arg(long, env = "LANCHAT_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Server port to connect to
    #[arg(long, env = "LANCHAT_PORT", default_value = "5555")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    print!("Enter your username: ");
    std::io::stdout().flush()?;
    let mut username = String::new();
    std::io::stdin().read_line(&mut username)?;
    let username = username.trim();
    if username.is_empty() {
        eprintln!("Username must not be empty.");
        return Ok(());
    }

    let stream = TcpStream::connect((args.host.as_str(), args.port)).await?;
    let (read_half, mut write_half) = stream.into_split();

    write_half.write_all(format!("{username}\n").as_bytes()).await?;

    let mut server_lines = BufReader::new(read_half).lines();
    let mut stdin_lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            inbound = server_lines.next_line() => match inbound {
                Ok(Some(line)) => println!("{line}"),
                _ => {
                    println!("Disconnected from the server.");
                    break;
                }
            },
            outbound = stdin_lines.next_line() => match outbound {
                Ok(Some(line)) => {
                    if line.trim().eq_ignore_ascii_case("exit") {
                        break;
                    }
                    write_half.write_all(format!("{line}\n").as_bytes()).await?;
                }
                _ => break,
            },
        }
    }

    Ok(())
}
