mod server;

pub use server::PaletteGrpcServer;
