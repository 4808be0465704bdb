/// Location of the manifest inside a JAR
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Main section of a JAR manifest. Lines end in CRLF and the section ends
/// with an empty line.
pub fn build_manifest(version: &str) -> String {
    format!(
        "Manifest-Version: 1.0\r\nCreated-By: patchjar {}\r\n\r\n",
        version
    )
}
