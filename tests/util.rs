#![allow(dead_code)]

use csrkit::catalog::CertificateType;
use csrkit::csr::Csr;

/// CN `example.com`, SANs `www.example.com` and `ftp.example.com`, 1024-bit RSA.
pub const RSA_CN_AND_SAN: &str = "\
-----BEGIN CERTIFICATE REQUEST-----\n\
MIIBkzCB/QIBADAWMRQwEgYDVQQDDAtleGFtcGxlLmNvbTCBnzANBgkqhkiG9w0B\n\
AQEFAAOBjQAwgYkCgYEA0SoP9mkRDebGOM6RRthcRYocS3QhlyfyOkH/P7MYJ7TP\n\
jUN1T6CX3UXljHI3/y0FZQbihnbxidi1VtjMrCFg//pJeZJh77jfl+cr8FFIslyJ\n\
e8zpAsIE2yf1flOdabNNKm8DU1lCmIp6RSxwacuee8eofinJHlfAsn/xsIaJZBsC\n\
AwEAAaA+MDwGCSqGSIb3DQEJDjEvMC0wKwYDVR0RBCQwIoIPd3d3LmV4YW1wbGUu\n\
Y29tgg9mdHAuZXhhbXBsZS5jb20wDQYJKoZIhvcNAQELBQADgYEAqlQP1YYkMQkq\n\
ehm+rfjdOMJwrEJAwJ0/O/RbFcwnb2x8YO9r/5Zuz1s3MIAekunDsdYLGTKuhKD0\n\
AO/dksVF3YCmZz8hshXvDhGoBP09NIQe/0/Xo5bRMtTE+6YU2fZ8EwBt0duFCh+O\n\
PUMpJq4wcK8tFbOgTsb0HjMXYmJIp6w=\n\
-----END CERTIFICATE REQUEST-----\n";

/// CN `example.com`, SANs `example.com`, `www.example.com` and `ftp.example.com`, 1024-bit DSA.
pub const DSA_CN_AND_SAN: &str = "\
-----BEGIN CERTIFICATE REQUEST-----\n\
MIICZTCCAiMCAQAwFjEUMBIGA1UEAwwLZXhhbXBsZS5jb20wggG3MIIBKwYHKoZI\n\
zjgEATCCAR4CgYEA05l9ZxJ1zIgM4aMwhQzNBGFgNzM3XbvHeeQsCWSFdTGSADf6\n\
Bv28pQCllLTLjWqAx4C/gF7nz9V+zslLoI/zijFm8FtobWoSCwH9RXl7FZzHv7jG\n\
3uXjVXEsh5gFfhDyhDbkwhf+NZWJiMryIIl7Be0Y6t6g1EDpduP87/rkEx0CFQCk\n\
uz+J8tVEDwSDlSInu9vpC3kwxwKBgDWvaMZADHhm/da4y+ODWkpEG4q2kOqhSmBb\n\
sVXOjUHFF9WzA+mJavtn8o+Vl4FxtQbL88q1WL4phXlN3Wbk3uflEuCZ5w5kyD2i\n\
Y3nquUAEx80dDEWKFZ8PoDe78IHNQne4hzvZM7xAd8hWJkysMPI2l/k0JO3hp1V2\n\
6iyuZxaBA4GFAAKBgQCNMr2Y9qI1/qNl1MkE7rI/ocbCRw9uKE0lWDimxl7XgPPP\n\
UqaNKAz0+Uh3kd1rqevtoUdPJBw2SqWRjkNxBcFQt2+mYpAcO6Ki4Ph07VdEeDu7\n\
dQeGuMijK4sIYnepA4v2Cu4n3kYzgfp9Yn/3YjwS1JJwgVbV8grd0LDY7ubd36BL\n\
MEkGCSqGSIb3DQEJDjE8MDowOAYDVR0RBDEwL4ILZXhhbXBsZS5jb22CD3d3dy5l\n\
eGFtcGxlLmNvbYIPZnRwLmV4YW1wbGUuY29tMAsGCWCGSAFlAwQDAgMvADAsAhR4\n\
fluirIpoxStgOepOr/0h7pmyogIUV8Y8yEUf7Cn3mNrqwNCWbOXXoiQ=\n\
-----END CERTIFICATE REQUEST-----\n";

/// Empty subject, SAN `example.com`, 1024-bit RSA.
pub const RSA_SAN_ONLY: &str = "\
-----BEGIN CERTIFICATE REQUEST-----\n\
MIIBaDCB0gIBADAAMIGfMA0GCSqGSIb3DQEBAQUAA4GNADCBiQKBgQDkFoOvytfA\n\
ywtwUBNto+2zVtbr4I1qLzfDpJNbrxDTLT1GQ6+yFGqtMzvwo28+8tkMAt3EeAVr\n\
4nv0Zw5NqlHbaGy/s8ECFGl3aIcw3vq7OazNL0SH1rCSUSbHNFd1o/3tj8x7sgDm\n\
UmJD2C3Cn8MfRPM2R+USDxfNO+NZh3T+fwIDAQABoCkwJwYJKoZIhvcNAQkOMRow\n\
GDAWBgNVHREEDzANggtleGFtcGxlLmNvbTANBgkqhkiG9w0BAQsFAAOBgQDTUzBx\n\
3NbOMQcaVsvACwrOleueqRncFnNoq3h6F9mbBr/28t4E8eCDVzB47sTohGSXysqg\n\
7NJQc1wCn6aPRw5LPJLP61HBLN8vw1c2e09Y1RSumr/CgOgPBiD8tI235oorMxZq\n\
KlEj1jBS5+uZLFU4O2Xl8fUkQz4tH4Zl0Hoplw==\n\
-----END CERTIFICATE REQUEST-----\n";

/// CN `example.com`, no extensions, 1024-bit RSA.
pub const RSA_CN_ONLY: &str = "\
-----BEGIN CERTIFICATE REQUEST-----\n\
MIIBVTCBvwIBADAWMRQwEgYDVQQDDAtleGFtcGxlLmNvbTCBnzANBgkqhkiG9w0B\n\
AQEFAAOBjQAwgYkCgYEA0SoP9mkRDebGOM6RRthcRYocS3QhlyfyOkH/P7MYJ7TP\n\
jUN1T6CX3UXljHI3/y0FZQbihnbxidi1VtjMrCFg//pJeZJh77jfl+cr8FFIslyJ\n\
e8zpAsIE2yf1flOdabNNKm8DU1lCmIp6RSxwacuee8eofinJHlfAsn/xsIaJZBsC\n\
AwEAAaAAMA0GCSqGSIb3DQEBCwUAA4GBAEBZjx2e2nMTX3dJ2Oi4AFtF6BaZM4uD\n\
n9dL3B0REi+aFR2duzhm8LqntaHvHpHxI0kGCAy4xXySyGm+3+bCJxzSFDA3OAo1\n\
JiBTrv+eND/Ks7/KnXf/qT/0zcrwfAfDGwBp/kxRWp5MHBQSAFMKtsfSTbqDof0U\n\
h0UdQogGL49X\n\
-----END CERTIFICATE REQUEST-----\n";

/// CN `*.example.com`, no extensions, 1024-bit RSA.
pub const RSA_WILDCARD_CN: &str = "\
-----BEGIN CERTIFICATE REQUEST-----\n\
MIIBVzCBwQIBADAYMRYwFAYDVQQDDA0qLmV4YW1wbGUuY29tMIGfMA0GCSqGSIb3\n\
DQEBAQUAA4GNADCBiQKBgQDOT/UPp/gQqrd1dUBA6Wdj/T2hzfYLTarDNTgfoIkF\n\
Wab/wGBHWmG5i6g7UMD3V+5RjAXs0/wsP5XCpwGKqdz8ZpYu5/sOqfMZy9kwXQGz\n\
Cmh/0+n/Wf8uVCX/3t2QqFBa5/xu8H3irdeFYw8iSPQe/2IKYA1mO/ysRDCPqE73\n\
ZwIDAQABoAAwDQYJKoZIhvcNAQELBQADgYEAm//JbBC+xegvWBa0/gRwYdwcocds\n\
GvqBxh+UtEpgwUp70RtNVaK5mfMLrLZhJ/Y0YTS+4vuBmqI0oa+DZweMPpJutWJd\n\
fP7POXU+zt0JDT1imnyUBy4eDeRPA54w6xnka92SXF781RyeuOVAUWEiH2K28q6f\n\
kQ73v+4Go99Muww=\n\
-----END CERTIFICATE REQUEST-----\n";

pub fn parse(pem: &str) -> Csr {
    Csr::parse(pem).expect("fixture CSR should parse")
}

/// Two-entry catalog where the single-name product also offers 90 days.
pub fn small_catalog() -> Vec<CertificateType> {
    vec![
        CertificateType::new(25, "test SSL (SHA-2)", [90, 365, 730]),
        CertificateType::new(27, "test Multi Domain SSL (SHA-2)", [365, 730]),
    ]
}

/// A realistic CA catalog, with the entry named `last_name` moved to the end
/// so a match can only succeed by rejecting everything before it.
pub fn mock_catalog(last_name: Option<&str>) -> Vec<CertificateType> {
    let mut types = vec![
        CertificateType::new(224, "TestCompany SSL (SHA-2)", [365, 730]),
        CertificateType::new(227, "TestCompany Wildcard SSL Certificate (SHA-2)", [365, 730]),
        CertificateType::new(226, "TestCompany Multi Domain SSL (SHA-2)", [365, 730]),
        CertificateType::new(
            228,
            "TestCompany Unified Communications Certificate (SHA-2)",
            [365, 730],
        ),
        CertificateType::new(229, "Comodo EV Multi Domain SSL (SHA-2)", [365, 730]),
        CertificateType::new(98, "Comodo EV Multi Domain SSL", [365, 730]),
        CertificateType::new(215, "IGTF Server Cert", [365, 395]),
        CertificateType::new(283, "IGTF Multi Domain", [365, 395]),
        CertificateType::new(179, "AMT SSL Certificate", [365, 730]),
        CertificateType::new(180, "AMT Wildcard SSL Certificate", [365, 730]),
        CertificateType::new(181, "AMT Multi-Domain SSL Certificate", [365, 730]),
        CertificateType::new(
            243,
            "Comodo Elite SSL Certificate (FileMaker) (SHA-2)",
            [365, 730],
        ),
        CertificateType::new(284, "TestCompany ECC", [365, 730]),
        CertificateType::new(286, "TestCompany ECC Multi Domain", [365, 730]),
        CertificateType::new(285, "TestCompany ECC Wildcard", [365, 730]),
        CertificateType::new(60, "Comodo EV SSL Certificate", [365, 730]),
        CertificateType::new(249, "Comodo EV SSL Certificate (SHA-2)", [365, 730]),
        CertificateType::new(363, "EV Anchor Certificate", [395]),
    ];
    if let Some(last_name) = last_name {
        let index = types
            .iter()
            .position(|t| t.name == last_name)
            .expect("catalog entry to move");
        let item = types.remove(index);
        types.push(item);
    }
    types
}
