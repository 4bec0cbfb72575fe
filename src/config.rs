use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

use crate::server::SchemaOptions;

/// In-memory GraphQL library of authors and books
#[derive(Parser, Debug, Clone)]
#[command(name = "bookshelf", version, about)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "BOOKSHELF_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "BOOKSHELF_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Resolve `Book.author` by the book's authorID instead of always returning null
    #[arg(long)]
    pub link_book_authors: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn schema_options(&self) -> SchemaOptions {
        SchemaOptions {
            link_book_authors: self.link_book_authors,
        }
    }
}
