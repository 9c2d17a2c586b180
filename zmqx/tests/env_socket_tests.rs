//! Run-time revision selection through `ZMQX_REVISION`
//!
//! Kept in its own binary: the variable is process-wide.

use zmqx::mock::MockSocket;
use zmqx::prelude::*;

const REVISION_ENV: &str = "ZMQX_REVISION";

#[test]
fn test_from_env_reads_revision() {
    std::env::set_var(REVISION_ENV, "2.x");
    let socket = ExtSocket::from_env(MockSocket::for_revision(Revision::V2)).unwrap();
    assert_eq!(socket.revision(), Revision::V2);

    // Plain constructors keep the build default.
    let socket = ExtSocket::new(MockSocket::default());
    assert_eq!(socket.revision(), Revision::current());

    std::env::set_var(REVISION_ENV, "bogus");
    assert!(matches!(
        ExtSocket::from_env(MockSocket::default()),
        Err(ZmqxError::InvalidRevision(_))
    ));

    std::env::remove_var(REVISION_ENV);
    let socket = ExtSocket::from_env(MockSocket::default()).unwrap();
    assert_eq!(socket.revision(), Revision::current());
}
