//! Structure checks on generated certificates, validated both with the
//! openssl crate and by parsing the DER back with x509-cert.

use der::DecodePem;
use faketlscerts::CA;
use faketlscerts::extensions::{
    AuthorityKeyIdentifier, BasicConstraints, SubjectAltName, SubjectKeyIdentifier, X509Extension,
};
use openssl::stack::Stack;
use openssl::x509::store::X509StoreBuilder;
use openssl::x509::{X509, X509StoreContext};
use x509_cert::Certificate;

fn parse(pem: &[u8]) -> Certificate {
    Certificate::from_pem(pem).expect("generated certificate parses")
}

fn find_extension<E: X509Extension>(cert: &Certificate) -> Option<(bool, E)> {
    cert.tbs_certificate
        .extensions
        .as_ref()?
        .iter()
        .find(|ext| ext.extn_id == E::OID)
        .map(|ext| {
            let decoded = E::from_der_value(ext.extn_value.as_bytes()).expect("extension decodes");
            (ext.critical, decoded)
        })
}

#[test]
fn root_cert_is_a_self_signed_ca() {
    let ca = CA::new().unwrap();
    let cert = parse(ca.cert_pem().bytes());

    assert_eq!(cert.tbs_certificate.subject, cert.tbs_certificate.issuer);
    assert!(
        cert.tbs_certificate
            .subject
            .to_string()
            .contains("Testing CA")
    );

    let (critical, bc) = find_extension::<BasicConstraints>(&cert).expect("basic constraints");
    assert!(critical);
    assert!(bc.is_ca);
    assert_eq!(bc.max_path_length, Some(9));

    let (critical, _ski) = find_extension::<SubjectKeyIdentifier>(&cert).expect("ski");
    assert!(!critical);

    // openssl agrees that the root verifies itself.
    let x509 = X509::from_pem(ca.cert_pem().bytes()).unwrap();
    let key = x509.public_key().unwrap();
    assert!(x509.verify(&key).unwrap());
}

#[test]
fn leaf_links_to_its_authority() {
    let ca = CA::new().unwrap();
    let leaf = ca.issue_server_cert(&["example.org"]).unwrap();
    assert_eq!(leaf.cert_chain_pems.len(), 1);

    let root = parse(ca.cert_pem().bytes());
    let cert = parse(leaf.cert_chain_pems[0].bytes());

    assert_eq!(cert.tbs_certificate.issuer, root.tbs_certificate.subject);
    assert!(
        cert.tbs_certificate
            .subject
            .to_string()
            .contains("Testing cert")
    );

    let (critical, bc) = find_extension::<BasicConstraints>(&cert).expect("basic constraints");
    assert!(critical);
    assert!(!bc.is_ca);

    let (_, root_ski) = find_extension::<SubjectKeyIdentifier>(&root).expect("root ski");
    let (critical, aki) = find_extension::<AuthorityKeyIdentifier>(&cert).expect("aki");
    assert!(!critical);
    assert_eq!(aki.key_identifier, root_ski.key_identifier);
}

#[test]
fn san_entries_match_hostnames_in_order() {
    let ca = CA::new().unwrap();
    let hostnames = ["zzz.example.org", "aaa.example.org", "example.org"];
    let leaf = ca.issue_server_cert(&hostnames).unwrap();

    let cert = parse(leaf.cert_chain_pems[0].bytes());
    let (critical, san) = find_extension::<SubjectAltName>(&cert).expect("san");
    assert!(critical);
    assert_eq!(san.dns_names, hostnames);
}

#[test]
fn serial_numbers_differ_across_issuances() {
    let ca = CA::new().unwrap();
    let a = parse(
        ca.issue_server_cert(&["example.org"]).unwrap().cert_chain_pems[0].bytes(),
    );
    let b = parse(
        ca.issue_server_cert(&["example.org"]).unwrap().cert_chain_pems[0].bytes(),
    );
    assert_ne!(
        a.tbs_certificate.serial_number,
        b.tbs_certificate.serial_number
    );
}

#[test]
fn openssl_verifies_leaf_against_issuing_ca_only() {
    let ca = CA::new().unwrap();
    let other_ca = CA::new().unwrap();
    let leaf = ca.issue_server_cert(&["example.org"]).unwrap();
    let leaf_x509 = X509::from_pem(leaf.cert_chain_pems[0].bytes()).unwrap();

    let verify = |root_pem: &[u8]| -> bool {
        let mut store = X509StoreBuilder::new().unwrap();
        store.add_cert(X509::from_pem(root_pem).unwrap()).unwrap();
        let store = store.build();
        let chain = Stack::new().unwrap();
        let mut ctx = X509StoreContext::new().unwrap();
        ctx.init(&store, &leaf_x509, &chain, |c| c.verify_cert())
            .unwrap()
    };

    assert!(verify(ca.cert_pem().bytes()));
    assert!(!verify(other_ca.cert_pem().bytes()));
}

#[test]
fn combined_bundle_is_key_block_then_cert_block() {
    let ca = CA::new().unwrap();
    let leaf = ca.issue_server_cert(&["example.org"]).unwrap();

    let blocks = pem::parse_many(leaf.private_key_and_cert_chain_pem.bytes()).unwrap();
    let tags: Vec<&str> = blocks.iter().map(|b| b.tag()).collect();
    assert_eq!(tags, ["PRIVATE KEY", "CERTIFICATE"]);
}
