//! §4.5: `[ userinfo "@" ] host [ ":" port ]`, including the host state machine covering
//! `reg-name`, `IPv4address`, bracketed `IPv6address`, and `IPvFuture`.

use crate::charset::{self, CharacterSet, HEXDIG, IPV_FUTURE_LAST_PART, REG_NAME_NOT_PCT_ENCODED, USER_INFO_NOT_PCT_ENCODED};
use crate::error::{Component, ParseError};
use crate::percent::{self, PercentDecoder};
use crate::uri::Uri;

/// How strictly an IP-literal's interior is checked. The default (`Lax`) matches the source
/// system's own laxness (design note §9): no `h16`-grouping or `::`-placement validation. `Strict`
/// additionally runs a structural IPv6 validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostValidation {
    #[default]
    Lax,
    Strict,
}

/// The byte alphabet allowed inside an IPv6 bracketed literal under `Lax` validation: hex digits,
/// `:` (group separator), and `.` (for an embedded `IPv4address` tail). This is looser than full
/// RFC 3986 `IPv6address` (no group-count or `::`-placement checking) but still rejects obvious
/// garbage such as a stray letter outside `a`-`f`.
const IPV6_LAX_ALPHABET: CharacterSet = HEXDIG.union(CharacterSet::single(b':')).union(CharacterSet::single(b'.'));

/// Parses an authority substring (already stripped of the leading `//`, and not containing `/`)
/// into `uri`'s userinfo/host/port fields.
pub fn parse_authority(authority: &[u8], host_validation: HostValidation, uri: &mut Uri) -> Result<(), ParseError> {
    let (userinfo_part, host_port_part) = match authority.iter().rposition(|&b| b == b'@') {
        Some(idx) => (Some(&authority[..idx]), &authority[idx + 1..]),
        None => (None, authority),
    };

    uri.userinfo = match userinfo_part {
        Some(ui) => Some(percent::decode_element(ui, USER_INFO_NOT_PCT_ENCODED, Component::UserInfo)?),
        None => None,
    };

    let (host, has_port, port) = parse_host_port(host_port_part, host_validation)?;
    uri.host = Some(host);
    uri.has_port = has_port;
    uri.port = port;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostState {
    FirstCharacter,
    NotIpLiteral,
    PercentEncoded,
    IpLiteral,
    Ipv6Address,
    IpvFutureNumber,
    IpvFutureBody,
    GarbageCheck,
    Port,
}

fn parse_host_port(input: &[u8], host_validation: HostValidation) -> Result<(Vec<u8>, bool, u16), ParseError> {
    let mut state = HostState::FirstCharacter;
    let mut host: Vec<u8> = Vec::new();
    let mut port_str: Vec<u8> = Vec::new();
    let mut is_reg_name = false;
    let mut pec = PercentDecoder::new();

    let mut i = 0usize;
    while i < input.len() {
        let byte = input[i];
        match state {
            HostState::FirstCharacter => {
                if byte == b'[' {
                    host.push(byte);
                    state = HostState::IpLiteral;
                    i += 1;
                } else {
                    is_reg_name = true;
                    state = HostState::NotIpLiteral;
                    // re-dispatch: same byte, no advance
                }
            }
            HostState::NotIpLiteral => match byte {
                b'%' => {
                    pec = PercentDecoder::new();
                    state = HostState::PercentEncoded;
                    i += 1;
                }
                b':' => {
                    state = HostState::Port;
                    i += 1;
                }
                b if REG_NAME_NOT_PCT_ENCODED.contains(b) => {
                    host.push(b);
                    i += 1;
                }
                b => return Err(ParseError::IllegalChar { component: Component::Host, position: i, found: b }),
            },
            HostState::PercentEncoded => {
                pec = pec
                    .hex_digit(byte)
                    .map_err(|_| ParseError::PercentEscape(i))?;
                i += 1;
                if let Some(decoded) = pec.take() {
                    host.push(decoded);
                    state = HostState::NotIpLiteral;
                }
            }
            HostState::IpLiteral => {
                if byte == b'v' {
                    host.push(byte);
                    state = HostState::IpvFutureNumber;
                    i += 1;
                } else {
                    state = HostState::Ipv6Address;
                    // re-dispatch: same byte, no advance
                }
            }
            HostState::Ipv6Address => {
                if byte == b']' {
                    host.push(byte);
                    state = HostState::GarbageCheck;
                    i += 1;
                } else if !IPV6_LAX_ALPHABET.contains(byte) {
                    // §9 open question: the source's IPv6 branch accepts any byte up to `]`. This
                    // crate narrows that to the IPv6 alphabet even in `Lax` mode -- otherwise
                    // "[::fxff:1.2.3.4]" (required to fail, per spec.md §8) would parse. No
                    // group-count or `::`-placement checking happens here either way; that's
                    // `Strict`-only, in `validate_strict_ipv6` below.
                    return Err(ParseError::IllegalChar { component: Component::Host, position: i, found: byte });
                } else {
                    host.push(byte);
                    i += 1;
                }
            }
            HostState::IpvFutureNumber => {
                if byte == b'.' {
                    host.push(byte);
                    state = HostState::IpvFutureBody;
                    i += 1;
                } else if !HEXDIG.contains(byte) {
                    return Err(ParseError::IpFutureChar(i));
                } else {
                    host.push(byte);
                    i += 1;
                }
            }
            HostState::IpvFutureBody => {
                host.push(byte);
                if byte == b']' {
                    state = HostState::GarbageCheck;
                    i += 1;
                } else if !IPV_FUTURE_LAST_PART.contains(byte) {
                    return Err(ParseError::IpFutureChar(i));
                } else {
                    i += 1;
                }
            }
            HostState::GarbageCheck => {
                if byte == b':' {
                    state = HostState::Port;
                    i += 1;
                } else {
                    return Err(ParseError::UnbalancedIpLiteral);
                }
            }
            HostState::Port => {
                port_str.push(byte);
                i += 1;
            }
        }
    }

    // An IP-literal that never saw its closing bracket is unbalanced.
    if matches!(state, HostState::IpLiteral | HostState::Ipv6Address | HostState::IpvFutureNumber | HostState::IpvFutureBody) {
        return Err(ParseError::UnbalancedIpLiteral);
    }
    if state == HostState::PercentEncoded {
        return Err(ParseError::PercentEscape(input.len()));
    }

    if is_reg_name {
        charset::fold_ascii_lower(&mut host);
    } else if host.starts_with(b"[") && host.ends_with(b"]") {
        // §3: the stored form strips the outer IP-literal brackets; the serializer re-adds them.
        host = host[1..host.len() - 1].to_vec();
        if host_validation == HostValidation::Strict {
            validate_strict_ipv6(&host)?;
        }
    }

    let has_port = !port_str.is_empty();
    let port = if has_port {
        let s = std::str::from_utf8(&port_str).map_err(|_| ParseError::PortNotDecimal)?;
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::PortNotDecimal);
        }
        let value: u64 = s.parse().map_err(|_| ParseError::PortNotDecimal)?;
        u16::try_from(value).map_err(|_| ParseError::PortOutOfRange(value))?
    } else {
        0
    };

    Ok((host, has_port, port))
}

/// A structural (but not fully RFC-faithful) IPv6 validator used only under `Strict`: at most one
/// `::`, no more than 8 groups (an embedded trailing IPv4 counts as 2), and every group is 1-4 hex
/// digits.
fn validate_strict_ipv6(host: &[u8]) -> Result<(), ParseError> {
    let s = std::str::from_utf8(host).map_err(|_| ParseError::IpFutureChar(0))?;
    if s.starts_with('v') {
        return Ok(()); // IPvFuture already validated by the state machine.
    }

    let double_colon_count = s.matches("::").count();
    if double_colon_count > 1 {
        return Err(ParseError::UnbalancedIpLiteral);
    }

    let halves: Vec<&str> = if double_colon_count == 1 { s.splitn(2, "::").collect() } else { vec![s] };
    let mut group_count = 0usize;
    for (half_index, half) in halves.iter().enumerate() {
        if half.is_empty() {
            continue;
        }
        let parts: Vec<&str> = half.split(':').collect();
        for (part_index, part) in parts.iter().enumerate() {
            let is_last_overall = double_colon_count == 0 && half_index == 0 && part_index == parts.len() - 1;
            let is_last_of_second_half = double_colon_count == 1 && half_index == 1 && part_index == parts.len() - 1;
            if (is_last_overall || is_last_of_second_half) && part.contains('.') {
                if !is_valid_ipv4(part) {
                    return Err(ParseError::UnbalancedIpLiteral);
                }
                group_count += 2;
                continue;
            }
            if part.is_empty() || part.len() > 4 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ParseError::UnbalancedIpLiteral);
            }
            group_count += 1;
        }
    }

    let max_groups = if double_colon_count == 1 { 7 } else { 8 };
    if group_count > max_groups || (double_colon_count == 0 && group_count != 8) {
        return Err(ParseError::UnbalancedIpLiteral);
    }
    Ok(())
}

fn is_valid_ipv4(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    parts.len() == 4 && parts.iter().all(|p| !p.is_empty() && p.len() <= 3 && p.parse::<u8>().is_ok())
}
