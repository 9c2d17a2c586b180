//! Option accessor tests against the recording mock socket

use zmqx_core::catalog::{
    Access, Catalog, IntWidth, OptionCategory, OptionName, ZMQ_APUB_APPROVE,
    ZMQ_DISCONNECT_PEER_BY_ID, ZMQ_LAST_PEER_ADDR, ZMQ_LAST_PEER_UNIQ_ID,
};
use zmqx_core::config::BindingConfig;
use zmqx_core::error::{TransportErrorKind, ZmqxError, ETERM};
use zmqx_core::revision::Revision;
use zmqx_sys::accessor::OptionAccessor;
use zmqx_sys::mock::{MockSocket, EINVAL};

fn v3() -> (MockSocket, Catalog) {
    (
        MockSocket::for_revision(Revision::V3),
        Catalog::for_revision(Revision::V3),
    )
}

#[test]
fn test_int_round_trip_every_read_write_option() {
    for revision in Revision::ALL {
        let catalog = Catalog::for_revision(revision);
        let mut socket = MockSocket::for_revision(revision);
        let mut opts = OptionAccessor::new(&mut socket, catalog);

        for desc in catalog.iter().filter(|d| d.access == Access::ReadWrite) {
            let OptionCategory::Integer(width) = desc.category else {
                continue;
            };
            match width {
                IntWidth::I32 => {
                    opts.set_int::<i32>(desc.name, -17).unwrap();
                    assert_eq!(opts.get_int::<i32>(desc.name).unwrap(), -17, "{}", desc.name);
                }
                IntWidth::U32 => {
                    opts.set_int::<u32>(desc.name, 4_000_000_000).unwrap();
                    assert_eq!(opts.get_int::<u32>(desc.name).unwrap(), 4_000_000_000);
                }
                IntWidth::I64 => {
                    opts.set_int::<i64>(desc.name, -1 << 40).unwrap();
                    assert_eq!(opts.get_int::<i64>(desc.name).unwrap(), -1 << 40, "{}", desc.name);
                }
                IntWidth::U64 => {
                    opts.set_int::<u64>(desc.name, 1 << 50).unwrap();
                    assert_eq!(opts.get_int::<u64>(desc.name).unwrap(), 1 << 50, "{}", desc.name);
                }
            }
        }
    }
}

#[test]
fn test_int_uses_exact_width() {
    let (mut socket, catalog) = v3();
    {
        let mut opts = OptionAccessor::new(&mut socket, catalog);
        opts.set_int::<i64>(OptionName::MaxMsgSize, 1024).unwrap();
        opts.set_int::<i32>(OptionName::Linger, 0).unwrap();
    }
    let calls = socket.set_calls();
    assert_eq!(calls[0].size, 8);
    assert_eq!(calls[1].size, 4);
    assert_eq!(calls[1].value.as_deref(), Some(&0i32.to_ne_bytes()[..]));
}

#[test]
fn test_int_width_mismatch_rejected() {
    let (mut socket, catalog) = v3();
    {
        let mut opts = OptionAccessor::new(&mut socket, catalog);
        let err = opts.get_int::<i32>(OptionName::Affinity).unwrap_err();
        assert!(matches!(err, ZmqxError::CategoryMismatch { .. }));
    }
    assert!(socket.get_calls().is_empty());
}

#[test]
fn test_int_short_value_is_size_mismatch() {
    let (mut socket, catalog) = v3();
    socket.store(8, &[1, 0]);
    let mut opts = OptionAccessor::new(&mut socket, catalog);

    let err = opts.get_int::<i32>(OptionName::Rate).unwrap_err();
    assert!(matches!(
        err,
        ZmqxError::SizeMismatch {
            expected: 4,
            actual: 2,
            ..
        }
    ));
}

#[test]
fn test_get_uint_peer_id() {
    let (mut socket, catalog) = v3();
    socket.store(ZMQ_LAST_PEER_UNIQ_ID, &3_000_000_000u32.to_ne_bytes());
    let mut opts = OptionAccessor::new(&mut socket, catalog);

    assert_eq!(opts.get_uint(OptionName::LastPeerUniqId).unwrap(), 3_000_000_000);
}

#[test]
fn test_bool_options() {
    let (mut socket, catalog) = v3();
    let mut opts = OptionAccessor::new(&mut socket, catalog);

    opts.set_bool(OptionName::Ipv4Only, false).unwrap();
    assert!(!opts.get_bool(OptionName::Ipv4Only).unwrap());
    opts.set_bool(OptionName::Ipv4Only, true).unwrap();
    assert!(opts.get_bool(OptionName::Ipv4Only).unwrap());
}

#[test]
fn test_string_set_sends_exact_length() {
    let (mut socket, catalog) = v3();
    {
        let mut opts = OptionAccessor::new(&mut socket, catalog);
        opts.set_string(OptionName::BlockAddr, "10.1.2.3").unwrap();
    }
    let call = &socket.set_calls()[0];
    assert!(!call.null_value);
    assert_eq!(call.size, 8);
    assert_eq!(call.value.as_deref(), Some(&b"10.1.2.3"[..]));
}

#[test]
fn test_string_get_drops_terminator() {
    let (mut socket, catalog) = v3();
    socket.store(ZMQ_LAST_PEER_ADDR, b"tcp://10.0.0.9:5555\0");
    let mut opts = OptionAccessor::new(&mut socket, catalog);

    assert_eq!(opts.get_string(OptionName::LastPeerAddr).unwrap(), "tcp://10.0.0.9:5555");
}

#[test]
fn test_bytes_keep_trailing_zero() {
    let (mut socket, catalog) = v3();
    let mut opts = OptionAccessor::new(&mut socket, catalog);

    opts.set_bytes(OptionName::Identity, b"id\0").unwrap();
    assert_eq!(&opts.get_bytes(OptionName::Identity).unwrap()[..], b"id\0");
}

#[test]
fn test_string_capacity_from_config() {
    let mut socket = MockSocket::for_revision(Revision::V3);
    socket.store(ZMQ_LAST_PEER_ADDR, b"tcp://a-rather-long-host-name:5555");
    let config = BindingConfig::new()
        .with_revision(Revision::V3)
        .with_string_capacity(8);
    {
        let mut opts = OptionAccessor::with_config(&mut socket, &config);
        let err = opts.get_string(OptionName::LastPeerAddr).unwrap_err();
        assert!(matches!(err, ZmqxError::Transport(_)));
    }
    assert_eq!(socket.get_calls(), &[(ZMQ_LAST_PEER_ADDR, 8)]);
}

#[test]
fn test_raw_param_passes_null_pointer() {
    let (mut socket, catalog) = v3();
    {
        let mut opts = OptionAccessor::new(&mut socket, catalog);
        opts.set_raw_param(OptionName::DisconnectPeerById, 123).unwrap();
    }
    let call = &socket.set_calls()[0];
    assert_eq!(call.code, ZMQ_DISCONNECT_PEER_BY_ID);
    assert!(call.null_value);
    assert_eq!(call.size, 123);
    assert!(socket.violations().is_empty());
}

#[test]
fn test_size_override_carries_peer_id() {
    let (mut socket, catalog) = v3();
    {
        let mut opts = OptionAccessor::new(&mut socket, catalog);
        opts.set_string_with_size_override(OptionName::ApubApprove, "tcp://10.0.0.7:5555", 77)
            .unwrap();
    }
    let call = &socket.set_calls()[0];
    assert_eq!(call.code, ZMQ_APUB_APPROVE);
    assert!(!call.null_value);
    assert_eq!(call.size, 77);
    assert_eq!(call.value.as_deref(), Some(&b"tcp://10.0.0.7:5555"[..]));
    assert!(socket.violations().is_empty());
}

#[test]
fn test_size_override_rejects_interior_nul() {
    let (mut socket, catalog) = v3();
    {
        let mut opts = OptionAccessor::new(&mut socket, catalog);
        let err = opts
            .set_string_with_size_override(OptionName::ApubApprove, "tcp\0x", 1)
            .unwrap_err();
        assert!(matches!(err, ZmqxError::InvalidValue(_)));
    }
    assert!(socket.set_calls().is_empty());
}

#[test]
fn test_shape_mismatch_rejected_before_native_call() {
    let (mut socket, catalog) = v3();
    {
        let mut opts = OptionAccessor::new(&mut socket, catalog);

        let err = opts.set_raw_param(OptionName::Linger, 1).unwrap_err();
        assert!(matches!(err, ZmqxError::CategoryMismatch { .. }));

        let err = opts.set_string(OptionName::DisconnectPeerById, "7").unwrap_err();
        assert!(matches!(err, ZmqxError::CategoryMismatch { .. }));

        let err = opts.set_raw_param(OptionName::ApubApprove, 7).unwrap_err();
        assert!(matches!(err, ZmqxError::CategoryMismatch { .. }));

        let err = opts.set_int::<i32>(OptionName::ApubReq, 1).unwrap_err();
        assert!(matches!(err, ZmqxError::AccessDenied { .. }));

        let err = opts.get_string(OptionName::BlockAddr).unwrap_err();
        assert!(matches!(err, ZmqxError::AccessDenied { .. }));
        assert!(err.is_caller_error());
    }
    assert!(socket.set_calls().is_empty());
    assert!(socket.get_calls().is_empty());
}

#[test]
fn test_unknown_option_for_revision() {
    let mut socket = MockSocket::for_revision(Revision::V4);
    let mut opts = OptionAccessor::new(&mut socket, Catalog::for_revision(Revision::V4));

    let err = opts
        .set_string_with_size_override(OptionName::ApubApprove, "tcp://x:1", 1)
        .unwrap_err();
    assert!(matches!(err, ZmqxError::UnknownOption(_)));

    let err = opts.get_int::<i64>(OptionName::Swap).unwrap_err();
    assert!(matches!(err, ZmqxError::UnknownOption(_)));
}

#[test]
fn test_transport_error_carries_code() {
    let (mut socket, catalog) = v3();
    socket.fail_next(EINVAL);
    let mut opts = OptionAccessor::new(&mut socket, catalog);

    match opts.set_int::<i32>(OptionName::Linger, 0).unwrap_err() {
        ZmqxError::Transport(e) => assert_eq!(e.code(), EINVAL),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[test]
fn test_transport_error_terminated() {
    let (mut socket, catalog) = v3();
    socket.fail_next(ETERM);
    let mut opts = OptionAccessor::new(&mut socket, catalog);

    match opts.set_raw_param(OptionName::DisconnectPeerById, 5).unwrap_err() {
        ZmqxError::Transport(e) => {
            assert_eq!(e.kind(), TransportErrorKind::Terminated);
            assert!(e.is_terminated());
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[test]
fn test_last_recv_peer_addr_copies_then_frees() {
    let (mut socket, catalog) = v3();
    socket.set_last_recv_peer(Some("tcp://172.16.0.4:33000"));

    let address = {
        let mut opts = OptionAccessor::new(&mut socket, catalog);
        opts.last_recv_peer_addr().unwrap()
    };

    // The transport string has been overwritten and released by now.
    assert_eq!(socket.live_strings(), 0);
    assert_eq!(socket.freed_strings(), 1);
    assert_eq!(address, "tcp://172.16.0.4:33000");
}

#[test]
fn test_last_recv_peer_addr_null() {
    let (mut socket, catalog) = v3();
    socket.set_last_recv_peer(None);
    {
        let mut opts = OptionAccessor::new(&mut socket, catalog);
        assert_eq!(opts.last_recv_peer_addr().unwrap(), "");
    }
    assert_eq!(socket.freed_strings(), 0);
}

#[test]
fn test_last_recv_peer_addr_failure() {
    let (mut socket, catalog) = v3();
    socket.set_last_recv_peer(Some("tcp://172.16.0.4:33000"));
    socket.fail_next(EINVAL);
    {
        let mut opts = OptionAccessor::new(&mut socket, catalog);
        assert!(opts.last_recv_peer_addr().is_err());
    }
    assert_eq!(socket.live_strings(), 0);
    assert_eq!(socket.freed_strings(), 0);
}

#[test]
fn test_last_recv_peer_addr_invalid_utf8_still_frees() {
    let (mut socket, catalog) = v3();
    socket.set_last_recv_peer_bytes(Some(b"tcp://\xff\xfe:5555"));
    {
        let mut opts = OptionAccessor::new(&mut socket, catalog);
        let err = opts.last_recv_peer_addr().unwrap_err();
        assert!(matches!(err, ZmqxError::Utf8(_)));
    }
    assert_eq!(socket.live_strings(), 0);
    assert_eq!(socket.freed_strings(), 1);
}

#[test]
fn test_peer_control_calls() {
    let (mut socket, catalog) = v3();
    {
        let mut opts = OptionAccessor::new(&mut socket, catalog);
        opts.disconnect_last_recv_peer().unwrap();
        opts.block_last_recv_peer().unwrap();
    }
    assert_eq!(
        socket.peer_calls(),
        &["disconnect_last_recv_peer", "block_last_recv_peer"]
    );
}
