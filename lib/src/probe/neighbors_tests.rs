use super::*;
use std::str::FromStr;

fn addr(s: &str) -> Ipv4Addr {
    Ipv4Addr::from_str(s).unwrap()
}

#[test]
fn parses_linux_arp_output() {
    let output =
        "gateway (192.168.1.1) at aa:bb:cc:dd:ee:ff [ether] on eth0\n";

    let mac = parse_neighbor_output(output, addr("192.168.1.1"));

    assert_eq!(mac, Some(MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff)));
}

#[test]
fn parses_macos_arp_output() {
    let output =
        "? (192.168.1.3) at a4:83:e7:2:99:11 on en0 ifscope [ethernet]\n";

    let mac = parse_neighbor_output(output, addr("192.168.1.3"));

    assert_eq!(mac, Some(MacAddr::new(0xa4, 0x83, 0xe7, 0x02, 0x99, 0x11)));
}

#[test]
fn parses_windows_arp_output() {
    let output = "\
Interface: 192.168.1.10 --- 0xb
  Internet Address      Physical Address      Type
  192.168.1.3           aa-bb-cc-dd-ee-01     dynamic
";

    let mac = parse_neighbor_output(output, addr("192.168.1.3"));

    assert_eq!(mac, Some(MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x01)));
}

#[test]
fn parses_proc_net_arp_table() {
    let output = "\
IP address       HW type     Flags       HW address            Mask     Device
192.168.1.2      0x1         0x2         08:00:27:12:34:56     *        eth0
192.168.1.7      0x1         0x0         00:00:00:00:00:00     *        eth0
";

    assert_eq!(
        parse_neighbor_output(output, addr("192.168.1.2")),
        Some(MacAddr::new(0x08, 0x00, 0x27, 0x12, 0x34, 0x56))
    );
}

#[test]
fn returns_none_for_missing_entry() {
    let output = "192.168.1.5 (192.168.1.5) -- no entry\n";
    assert_eq!(parse_neighbor_output(output, addr("192.168.1.5")), None);
}

#[test]
fn returns_none_for_incomplete_entry() {
    let output = "? (192.168.1.7) at (incomplete) on eth0\n";
    assert_eq!(parse_neighbor_output(output, addr("192.168.1.7")), None);
}

#[test]
fn rejects_broadcast_and_zero_entries() {
    let broadcast =
        "? (192.168.1.255) at ff:ff:ff:ff:ff:ff on eth0 ifscope [ethernet]\n";
    let zeroed =
        "192.168.1.7      0x1   0x0    00:00:00:00:00:00     *    eth0\n";

    assert_eq!(parse_neighbor_output(broadcast, addr("192.168.1.255")), None);
    assert_eq!(parse_neighbor_output(zeroed, addr("192.168.1.7")), None);
}

#[test]
fn never_matches_address_prefixes() {
    let output =
        "? (192.168.1.10) at aa:bb:cc:dd:ee:10 on eth0 ifscope [ethernet]\n";

    assert_eq!(parse_neighbor_output(output, addr("192.168.1.1")), None);
}

#[test]
fn picks_the_matching_line_among_many() {
    let output = "\
? (192.168.1.1) at aa:bb:cc:dd:ee:01 on eth0 ifscope [ethernet]
? (192.168.1.2) at aa:bb:cc:dd:ee:02 on eth0 ifscope [ethernet]
? (192.168.1.3) at aa:bb:cc:dd:ee:03 on eth0 ifscope [ethernet]
";

    assert_eq!(
        parse_neighbor_output(output, addr("192.168.1.2")),
        Some(MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x02))
    );
}

#[test]
fn lookup_never_panics() {
    let table = ArpCommandTable;
    let _ = table.lookup(addr("192.0.2.1"), Duration::from_secs(1));
}
