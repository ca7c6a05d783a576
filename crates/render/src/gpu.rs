use crate::vertex::PrimitiveBuffers;

/// Opaque handle to a node's GPU-side geometry, owned by whoever uploaded
/// it. There is no implicit collection of these; dispose is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuNodeId(pub u64);

/// Boundary to the external rendering engine. The viewer core only ever
/// uploads a fully-parsed node and disposes handles it received earlier.
pub trait GpuBackend {
    fn upload(&mut self, primitives: &[PrimitiveBuffers]) -> GpuNodeId;
    fn dispose(&mut self, id: GpuNodeId);
}

/// Backend for headless use: hands out ids and tracks how many uploads are
/// still live, which is all the session logic needs to be exercised.
#[derive(Debug, Default)]
pub struct NullBackend {
    next_id: u64,
    live: u64,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_nodes(&self) -> u64 {
        self.live
    }
}

impl GpuBackend for NullBackend {
    fn upload(&mut self, _primitives: &[PrimitiveBuffers]) -> GpuNodeId {
        self.next_id += 1;
        self.live += 1;
        GpuNodeId(self.next_id)
    }

    fn dispose(&mut self, _id: GpuNodeId) {
        self.live = self.live.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_backend_tracks_live_nodes() {
        let mut backend = NullBackend::new();
        let a = backend.upload(&[]);
        let b = backend.upload(&[]);
        assert_ne!(a, b);
        assert_eq!(backend.live_nodes(), 2);
        backend.dispose(a);
        assert_eq!(backend.live_nodes(), 1);
    }
}
