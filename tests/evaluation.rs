use ban_luck_core::{
    deck::{Card, Rank, Suit},
    hand::{evaluate, standing_value, Hand, HandTotals, Standing},
    special::{classify_special, Special},
};
use rstest::rstest;

fn hand(ranks: &[Rank]) -> Hand {
    let suits = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];
    Hand::from_cards(
        ranks
            .iter()
            .enumerate()
            .map(|(i, &rank)| {
                let seen = ranks[..i].iter().filter(|&&earlier| earlier == rank).count();
                Card::new(rank, suits[seen])
            })
            .collect(),
    )
}

fn pip(rank: Rank) -> u8 {
    match rank {
        Rank::Ace => 1,
        Rank::Two => 2,
        Rank::Three => 3,
        Rank::Four => 4,
        Rank::Five => 5,
        Rank::Six => 6,
        Rank::Seven => 7,
        Rank::Eight => 8,
        Rank::Nine => 9,
        _ => 10,
    }
}

#[test]
fn hands_without_aces_have_one_total() {
    let ranks: Vec<Rank> = Rank::ALL.into_iter().filter(|&rank| rank != Rank::Ace).collect();
    for &a in &ranks {
        for &b in &ranks {
            for &c in &ranks {
                let pair = pip(a) + pip(b);
                let triple = pair + pip(c);
                assert_eq!(evaluate(&hand(&[a, b])), HandTotals { low: pair, high: pair });
                assert_eq!(evaluate(&hand(&[a, b, c])), HandTotals { low: triple, high: triple });
            }
        }
    }
}

#[rstest]
#[case(&[Rank::Ace, Rank::Ten], 11, 21, Standing::Standable(21))]
#[case(&[Rank::Ace, Rank::Five, Rank::Five], 11, 20, Standing::Standable(20))]
#[case(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four], 10, 10, Standing::NotStandable)]
#[case(&[Rank::Ace, Rank::Five], 6, 16, Standing::Standable(16))]
#[case(&[Rank::Ace, Rank::Ace, Rank::Nine], 11, 29, Standing::NotStandable)]
#[case(&[Rank::Ace, Rank::Six, Rank::King], 17, 26, Standing::Standable(17))]
#[case(&[Rank::Ace, Rank::Ace, Rank::Five, Rank::Nine], 16, 16, Standing::Standable(16))]
#[case(&[Rank::Ten, Rank::Seven, Rank::Six], 23, 23, Standing::NotStandable)]
fn ace_values_depend_on_hand_size(
    #[case] ranks: &[Rank],
    #[case] low: u8,
    #[case] high: u8,
    #[case] standing: Standing,
) {
    let cards = hand(ranks);
    assert_eq!(evaluate(&cards), HandTotals { low, high });
    assert_eq!(standing_value(&cards), standing);
}

#[rstest]
#[case(&[Rank::Ace, Rank::Ace], &[Rank::King, Rank::Two], true, Special::BanBan)]
#[case(&[Rank::Ace, Rank::Ace], &[Rank::Ace, Rank::Ace], true, Special::BanBan)]
#[case(&[Rank::Ace, Rank::King], &[Rank::Nine, Rank::Two], true, Special::BanLuck)]
#[case(&[Rank::Ace, Rank::King], &[Rank::Ace, Rank::Ace], true, Special::None)]
#[case(&[Rank::Ace, Rank::King], &[Rank::Nine, Rank::Two], false, Special::None)]
#[case(&[Rank::Seven, Rank::Seven, Rank::Seven], &[Rank::Ace, Rank::Ace], true, Special::TripleSeven)]
#[case(&[Rank::Seven, Rank::Seven, Rank::Seven], &[Rank::Two, Rank::Two], false, Special::TripleSeven)]
#[case(&[Rank::Seven, Rank::Seven, Rank::Seven, Rank::Ace], &[Rank::Two, Rank::Two], false, Special::None)]
#[case(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six], &[Rank::Two, Rank::Two], false, Special::WuLongWin)]
#[case(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Nine], &[Rank::Two, Rank::Two], false, Special::WuLongBust)]
#[case(&[Rank::Ten, Rank::Nine], &[Rank::Two, Rank::Two], true, Special::None)]
fn special_hands(
    #[case] ranks: &[Rank],
    #[case] opponent: &[Rank],
    #[case] initial_deal: bool,
    #[case] expected: Special,
) {
    assert_eq!(classify_special(&hand(ranks), &hand(opponent), initial_deal), expected);
}
