pub mod batch;
pub mod error;
pub mod event;
pub mod replay;
pub mod scene;
pub mod state;
pub mod topo;

#[cfg(test)]
mod test;
