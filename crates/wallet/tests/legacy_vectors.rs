//! Keystore vectors from the legacy wallet test corpus
//!
//! These run at production KDF cost (scrypt N=2^18, PBKDF2 c=2^18).

use minter_wallet::{EncodeOptions, ErrorKind, Kdf, Wallet, WalletError};

const PRIVATE_KEY: &str = "efca4cdd31923b50f4214af5d2ae10e7ac45a5019e9431cc195482d707485378";
const SALT: &str = "dc9e4a98886738bd8aae134a1f89aaa5a502c3fbd10e336136d4d5fe47448ad6";
const IV: &str = "cecacd85e9cb89788b5aab2f93361233";
const UUID: &str = "7e59dc028d42d09db29aa8a0f862cc81";

const EXPECTED_PBKDF2: &str = r#"{"version":3,"id":"7e59dc02-8d42-409d-b29a-a8a0f862cc81","address":"b14ab53e38da1c172f877dbc6d65e4a1b0474c3c","Crypto":{"ciphertext":"01ee7f1a3c8d187ea244c92eea9e332ab0bb2b4c902d89bdd71f80dc384da1be","cipherparams":{"iv":"cecacd85e9cb89788b5aab2f93361233"},"cipher":"aes-128-ctr","kdf":"pbkdf2","kdfparams":{"dklen":32,"salt":"dc9e4a98886738bd8aae134a1f89aaa5a502c3fbd10e336136d4d5fe47448ad6","c":262144,"prf":"hmac-sha256"},"mac":"0c02cd0badfebd5e783e0cf41448f84086a96365fc3456716c33641a86ebc7cc"}}"#;

const EXPECTED_SCRYPT: &str = r#"{"version":3,"id":"7e59dc02-8d42-409d-b29a-a8a0f862cc81","address":"b14ab53e38da1c172f877dbc6d65e4a1b0474c3c","Crypto":{"ciphertext":"ecff07eca8c0ab9bfb2022c42e38a9592cf9ab77396ef4a46bee0a530e7f6a4a","cipherparams":{"iv":"cecacd85e9cb89788b5aab2f93361233"},"cipher":"aes-128-ctr","kdf":"scrypt","kdfparams":{"dklen":32,"salt":"dc9e4a98886738bd8aae134a1f89aaa5a502c3fbd10e336136d4d5fe47448ad6","n":262144,"r":1,"p":8},"mac":"e201037b8b701300d473b3124789572c9f939b732f6d122483dda2e03f72a28d"}}"#;

const V1_SAMPLE: &str = r#"{"Address":"d4584b5f6229b7be90727b0fc8c6b91bb427821f","Crypto":{"CipherText":"07533e172414bfa50e99dba4a0ce603f654ebfa1ff46277c3e0c577fdc87f6bb4e4fe16c5a94ce6ce14cfa069821ef9b","IV":"16d67ba0ce5a339ff2f07951253e6ba8","KeyHeader":{"Kdf":"scrypt","KdfParams":{"DkLen":32,"N":262144,"P":1,"R":8,"SaltLen":32},"Version":"1"},"MAC":"8ccded24da2e99a11d48cda146f9cc8213eb423e2ea0d8427f41c3be414424dd","Salt":"06870e5e6a24e183a5c807bd1c43afd86d573f7db303ff4853d135cd0fd3fe91"},"Id":"0498f19a-59db-4d54-ac95-33901b4f1870","Version":"1"}"#;

const V3_PBKDF2_SAMPLE: &str = r#"{"Crypto":{"cipher":"aes-128-ctr","cipherparams":{"iv":"6087dab2f9fdbbfaddc31a909735c1e6"},"ciphertext":"5318b4d5bcd28de64ee5559e671353e16f075ecae9f99c7a79a38af5f869aa46","kdf":"pbkdf2","kdfparams":{"c":262144,"dklen":32,"prf":"hmac-sha256","salt":"ae3cd4e7013836a3df6bd7241b12db061dbe2c6785853cce422d148a624ce0bd"},"mac":"517ead924a9d0dc3124507e3393d175ce3ff7c1e96529c6c555ce9e51205e9b2"},"id":"3198bc9c-6672-5ab3-d995-4942343ae5b6","version":3}"#;

const V3_SCRYPT_SAMPLE: &str = r#"{"address":"2f91eb73a6cd5620d7abb50889f24eea7a6a4feb","Crypto":{"cipher":"aes-128-ctr","cipherparams":{"iv":"a2bc4f71e8445d64ceebd1247079fbd8"},"ciphertext":"6b9ab7954c9066fa1e54e04e2c527c7d78a77611d5f84fede1bd61ab13c51e3e","kdf":"scrypt","kdfparams":{"dklen":32,"n":262144,"r":1,"p":8,"salt":"caf551e2b7ec12d93007e528093697a4c68e8a50e663b2a929754a8085d9ede4"},"mac":"506cace9c5c32544d39558025cb3bf23ed94ba2626e5338c82e50726917e1a15"},"id":"1b3cad9b-fa7b-4817-9022-d5e598eb5fe3","version":3}"#;

const V3_UNENCRYPTED_SAMPLE: &str = r#"{"address":"a9886ac7489ecbcbd79268a79ef00d940e5fe1f2","Crypto":{"cipher":"aes-128-ctr","cipherparams":{"iv":"c542cf883299b5b0a29155091054028d"},"ciphertext":"0a83c77235840cffcfcc5afe5908f2d7f89d7d54c4a796dfe2f193e90413ee9d","kdf":"scrypt","kdfparams":{"dklen":32,"n":262144,"r":1,"p":8,"salt":"699f7bf5f6985068dfaaff9db3b06aea8fe3dd3140b3addb4e60620ee97a0316"},"mac":"613fed2605240a2ff08b8d93ccc48c5b3d5023b7088189515d70df41d65f44de"},"id":"0edf817a-ee0e-4e25-8314-1f9e88a60811","version":3}"#;

const PRESALE_SAMPLE: &str = r#"{"encseed": "81ffdfaf2736310ce87df268b53169783e8420b98f3405fb9364b96ac0feebfb62f4cf31e0d25f1ded61f083514dd98c3ce1a14a24d7618fd513b6d97044725c7d2e08a7d9c2061f2c8a05af01f06755c252f04cab20fee2a4778130440a9344", "ethaddr": "22f8c5dd4a0a9d59d580667868df2da9592ab292", "email": "hello@ethereum.org", "btcaddr": "1DHW32MFwHxU2nk2SLAQq55eqFotT9jWcq"}"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn bytes<const N: usize>(hex_str: &str) -> [u8; N] {
    hex::decode(hex_str).unwrap().try_into().unwrap()
}

fn fixed_options(kdf: Kdf) -> EncodeOptions {
    EncodeOptions::default()
        .kdf(kdf)
        .salt(bytes(SALT))
        .iv(bytes(IV))
        .uuid(bytes(UUID))
}

fn vector_wallet() -> Wallet {
    Wallet::from_private_key(&hex::decode(PRIVATE_KEY).unwrap()).unwrap()
}

#[test]
fn test_to_v3_pbkdf2_vector() {
    init_tracing();
    let json = vector_wallet()
        .to_v3_string("testtest", &fixed_options(Kdf::Pbkdf2))
        .unwrap();
    assert_eq!(json, EXPECTED_PBKDF2);
}

#[test]
fn test_to_v3_scrypt_vector() {
    init_tracing();
    let json = vector_wallet()
        .to_v3_string("testtest", &fixed_options(Kdf::Scrypt))
        .unwrap();
    assert_eq!(json, EXPECTED_SCRYPT);
}

#[test]
fn test_from_v1() {
    init_tracing();
    let wallet = Wallet::from_v1(V1_SAMPLE, "foo").unwrap();
    assert_eq!(
        wallet.address_string(),
        "Mxd4584b5f6229b7be90727b0fc8c6b91bb427821f"
    );
}

#[test]
fn test_from_v3_pbkdf2() {
    init_tracing();
    let wallet = Wallet::from_v3(V3_PBKDF2_SAMPLE, "testpassword").unwrap();
    assert_eq!(
        wallet.address_string(),
        "Mx008aeeda4d805471df9b2a5b0f38a0c3bcba786b"
    );
}

#[test]
fn test_from_v3_scrypt() {
    init_tracing();
    let wallet = Wallet::from_v3(V3_SCRYPT_SAMPLE, "testtest").unwrap();
    assert_eq!(
        wallet.address_string(),
        "Mx2f91eb73a6cd5620d7abb50889f24eea7a6a4feb"
    );
}

#[test]
fn test_from_v3_empty_password() {
    init_tracing();
    let wallet = Wallet::from_v3(V3_UNENCRYPTED_SAMPLE, "").unwrap();
    assert_eq!(
        wallet.address_string(),
        "Mxa9886ac7489ecbcbd79268a79ef00d940e5fe1f2"
    );
}

#[test]
fn test_from_eth_sale() {
    init_tracing();
    let wallet = Wallet::from_eth_sale(PRESALE_SAMPLE, "testtest").unwrap();
    assert_eq!(
        hex::encode(wallet.address()),
        "22f8c5dd4a0a9d59d580667868df2da9592ab292"
    );
    assert_eq!(
        wallet.address_string(),
        "Mx22f8c5dd4a0a9d59d580667868df2da9592ab292"
    );
}

#[test]
fn test_from_eth_sale_wrong_password() {
    init_tracing();
    let err = Wallet::from_eth_sale(PRESALE_SAMPLE, "wrong").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
}

#[test]
fn test_from_v3_wrong_password() {
    init_tracing();
    let err = Wallet::from_v3(V3_PBKDF2_SAMPLE, "wrongpassword").unwrap_err();
    assert!(matches!(err, WalletError::Keystore(_)));
    assert_eq!(err.kind(), ErrorKind::Authentication);
}

#[test]
fn test_from_keystore_detects_every_format() {
    init_tracing();
    let v1 = Wallet::from_keystore(V1_SAMPLE, "foo").unwrap();
    assert_eq!(
        hex::encode(v1.address()),
        "d4584b5f6229b7be90727b0fc8c6b91bb427821f"
    );

    let v3 = Wallet::from_keystore(V3_PBKDF2_SAMPLE, "testpassword").unwrap();
    assert_eq!(
        hex::encode(v3.address()),
        "008aeeda4d805471df9b2a5b0f38a0c3bcba786b"
    );

    let presale = Wallet::from_keystore(PRESALE_SAMPLE, "testtest").unwrap();
    assert_eq!(
        hex::encode(presale.address()),
        "22f8c5dd4a0a9d59d580667868df2da9592ab292"
    );
}

#[test]
fn test_v1_reencoded_as_v3_decodes_to_same_key() {
    init_tracing();
    let original = Wallet::from_v1(V1_SAMPLE, "foo").unwrap();

    let options = EncodeOptions::default().scrypt_params(1024, 8, 1);
    let json = original.to_v3_string("new password", &options).unwrap();
    let restored = Wallet::from_v3(&json, "new password").unwrap();

    assert_eq!(*restored.private_key(), *original.private_key());
    assert_eq!(restored.address(), original.address());
}

#[test]
fn test_decoded_wallets_have_no_mnemonic() {
    init_tracing();
    let wallet = Wallet::from_v3(V3_PBKDF2_SAMPLE, "testpassword").unwrap();
    let err = wallet.mnemonic().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
}
