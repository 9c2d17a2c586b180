//! Interop tests against the linked libzmq

use zmqx_core::catalog::OptionName;
use zmqx_core::event::EventKind;
use zmqx_core::monitor::all_events_mask;
use zmqx_core::revision::Revision;
use zmqx_sys::accessor::OptionAccessor;
use zmqx_sys::decoder::recv_event;
use zmqx_sys::libzmq::{binding_config, linked_revision, zmq};

#[test]
fn test_linked_revision_matches_default() {
    let linked = linked_revision().unwrap();
    let (major, _, _) = zmq::version();
    assert_eq!(linked, Revision::from_version(major, 0).unwrap());

    // Only a build that pins no revision follows the linked library.
    if !cfg!(any(feature = "zmq_2_x", feature = "zmq_3_x", feature = "zmq_4_x")) {
        assert_eq!(Revision::current(), linked);
    }
}

#[test]
fn test_options_on_real_socket() {
    let config = binding_config().unwrap();
    let ctx = zmq::Context::new();
    let mut socket = ctx.socket(zmq::PUB).unwrap();
    socket.bind("tcp://127.0.0.1:*").unwrap();

    let mut opts = OptionAccessor::with_config(&mut socket, &config);
    opts.set_int::<i32>(OptionName::Linger, 250).unwrap();
    assert_eq!(opts.get_int::<i32>(OptionName::Linger).unwrap(), 250);

    let endpoint = opts.get_string(OptionName::LastEndpoint).unwrap();
    assert!(endpoint.starts_with("tcp://127.0.0.1:"), "{endpoint}");
}

#[test]
fn test_monitor_reports_listening() {
    let config = binding_config().unwrap();
    let revision = config.revision;
    if revision == Revision::V2 {
        return;
    }

    let ctx = zmq::Context::new();
    let publisher = ctx.socket(zmq::PUB).unwrap();
    publisher
        .monitor("inproc://zmqx-monitor", all_events_mask(revision) as i32)
        .unwrap();

    let mut monitor = ctx.socket(zmq::PAIR).unwrap();
    monitor.set_rcvtimeo(2000).unwrap();
    monitor.connect("inproc://zmqx-monitor").unwrap();

    publisher.bind("tcp://127.0.0.1:*").unwrap();

    let event = (0..4)
        .map(|_| recv_event(&mut monitor, revision, 0).unwrap())
        .find(|event| event.kind == EventKind::Listening)
        .expect("no LISTENING event");
    assert!(event.address.starts_with("tcp://127.0.0.1:"), "{event}");
    assert!(event.fd().is_some());
}
