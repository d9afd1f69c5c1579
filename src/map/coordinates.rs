// Approximate center points of the countries shown on the map.

use std::collections::BTreeMap;

use program_map::Coordinate;

const REFERENCE_COORDINATES: [(&str, f64, f64); 106] = [
    ("United States", 39.8283, -98.5795),
    ("Canada", 56.1304, -106.3468),
    ("Brazil", -14.2350, -51.9253),
    ("United Kingdom", 55.3781, -3.4360),
    ("Germany", 51.1657, 10.4515),
    ("France", 46.2276, 2.2137),
    ("India", 20.5937, 78.9629),
    ("Hong Kong, China", 22.7919, 114.7157),
    ("Japan", 36.2048, 138.2529),
    ("China", 35.8617, 104.1954),
    ("Australia", -25.2744, 133.7751),
    ("Nigeria", 9.0820, 8.6753),
    ("South Africa", -30.5595, 22.9375),
    ("Kenya", -0.0236, 37.9062),
    ("Italy", 41.8719, 12.5674),
    ("Russia", 61.5240, 105.3188),
    ("Mexico", 23.6345, -102.5528),
    ("Argentina", -38.4161, -63.6167),
    ("Colombia", 4.5709, -74.2973),
    ("Egypt", 26.8206, 30.8025),
    ("Kazakhstan", 48.0196, 66.9237),
    ("Bosnia and Herzegovina", 43.9159, 17.6791),
    ("Romania", 45.9432, 24.9668),
    ("Serbia", 44.0165, 21.0059),
    ("Ukraine", 48.3794, 31.1656),
    ("Mongolia", 47.8864, 106.9057),
    ("El Salvador", 13.7942, -88.8965),
    ("Philippines", 12.8797, 121.7740),
    ("Georgia", 42.3154, 43.3569),
    ("Costa Rica", 9.7489, -83.7534),
    ("Bhutan", 27.5142, 90.4336),
    ("Rwanda", -1.9403, 29.8739),
    ("Bulgaria", 42.7339, 25.4858),
    ("Hungary", 47.1625, 19.5033),
    ("Turkey", 38.9637, 35.2433),
    ("Indonesia", -0.7893, 113.9213),
    ("Iran", 32.4279, 53.6880),
    ("Belarus", 53.7098, 27.9534),
    ("Greece", 39.0742, 21.8243),
    ("Poland", 51.9194, 19.1451),
    ("Finland", 61.9241, 25.7482),
    ("Singapore", 1.3521, 103.8198),
    ("Cyprus", 35.1264, 33.4299),
    ("Armenia", 40.0691, 45.0382),
    ("North Macedonia", 41.6086, 21.7453),
    ("Netherlands", 52.1326, 5.2913),
    ("Uzbekistan", 41.3775, 64.5853),
    ("Albania", 41.1533, 20.1683),
    ("Algeria", 28.0339, 1.6596),
    ("Bangladesh", 23.6850, 90.3563),
    ("Bolivia", -16.2902, -63.5887),
    ("Botswana", -22.3285, 24.6849),
    ("Cameroon", 7.3697, 12.3547),
    ("Chile", -35.6751, -71.5430),
    ("Cuba", 21.5218, -77.7812),
    ("Czech Republic", 49.8175, 15.4730),
    ("Democratic Republic of the Congo", -4.0383, 21.7587),
    ("Dominican Republic", 18.7357, -70.1627),
    ("Ethiopia", 9.1450, 40.4897),
    ("Guatemala", 15.7835, -90.2308),
    ("Ivory Coast", 7.5400, -5.5471),
    ("Jordan", 30.5852, 36.2384),
    ("Kyrgyzstan", 41.2044, 74.7661),
    ("Latvia", 56.8796, 24.6032),
    ("Lesotho", -29.6100, 28.2336),
    ("Lithuania", 55.1694, 23.8813),
    ("Malaysia", 4.2105, 101.9758),
    ("Mauritania", 21.0079, -10.9408),
    ("Montenegro", 42.7087, 19.3744),
    ("Morocco", 31.7917, -7.0926),
    ("Namibia", -22.9576, 18.4904),
    ("Nepal", 28.3949, 84.1240),
    ("Nicaragua", 12.2651, -85.2072),
    ("Pakistan", 30.3753, 69.3451),
    ("Palestine", 31.9522, 35.2332),
    ("Peru", -9.1900, -75.0152),
    ("South Korea", 35.9078, 127.7669),
    ("South Sudan", 6.8770, 31.3070),
    ("Spain", 40.4637, -3.7492),
    ("Tanzania", -6.3690, 34.8888),
    ("Thailand", 15.8700, 100.9925),
    ("Tunisia", 33.8869, 9.5375),
    ("Uganda", 1.3733, 32.2903),
    ("Vietnam", 14.0583, 108.2772),
    ("Zimbabwe", -19.0154, 29.1549),
    ("Taiwan", 23.6978, 120.9605),
    ("Israel", 31.0461, 34.8516),
    ("Croatia", 45.1000, 15.2000),
    ("Slovenia", 46.1512, 14.9955),
    ("Saudi Arabia", 23.8859, 45.0792),
    ("Moldova", 47.4116, 28.3699),
    ("Azerbaijan", 40.1431, 47.5769),
    ("Slovakia", 48.6690, 19.6990),
    ("Estonia", 58.5953, 25.0136),
    ("Iceland", 64.9631, -19.0208),
    ("Ireland", 53.1424, -7.6921),
    ("Norway", 60.4720, 8.4689),
    ("Sweden", 60.1282, 18.6435),
    ("Denmark", 56.2639, 9.5018),
    ("Belgium", 50.5039, 4.4699),
    ("Luxembourg", 49.8153, 6.1296),
    ("Switzerland", 46.8182, 8.2275),
    ("Austria", 47.5162, 14.5501),
    ("Portugal", 39.3999, -8.2245),
    ("American Samoa", -14.2710, -170.1322),
    ("Eswatini", -26.5225, 31.4659),
];

pub fn reference_coordinates() -> BTreeMap<String, Coordinate> {
    REFERENCE_COORDINATES
        .iter()
        .map(|(name, lat, lng)| {
            (
                name.to_string(),
                Coordinate {
                    lat: *lat,
                    lng: *lng,
                },
            )
        })
        .collect()
}
